//! Shared helpers for pipeline tests: an axum server that stands in for
//! the Gemini API and the relay, plus temp-dir fixtures.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::Router;
use screen_companion_lib::config::AppConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// One request the mock received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub body: String,
}

type Handler = dyn Fn(&str) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    handler: Arc<Handler>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    /// Serve on an ephemeral port for the rest of the test. `handler` maps
    /// a request path (with query) to `(status, json body)`.
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            handler: Arc::new(handler),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(record_and_reply).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock addr");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("[TEST] mock server error: {}", e);
            }
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record_and_reply(
    State(state): State<MockState>,
    uri: Uri,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let path = uri
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let (status, reply) = (state.handler)(&path);
    state.requests.lock().unwrap().push(Recorded { path, body });
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        reply,
    )
}

/// A `generateContent` response carrying `text` as the only part.
pub fn candidates_json(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
    .to_string()
}

/// Fresh, empty directory under the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "screen-companion-it-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write a noisy PNG that still encodes to a JPEG above the size floor.
pub fn write_test_png(dir: &std::path::Path) -> PathBuf {
    let mut state: u32 = 0x1234_5678;
    let img = image::RgbImage::from_fn(320, 200, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        image::Rgb([r, g, b])
    });
    let path = dir.join("input.png");
    img.save(&path).unwrap();
    path
}

pub fn config(api_base: String, relay_url: Option<String>, data_dir: PathBuf) -> AppConfig {
    AppConfig {
        api_key: Some("test-key".to_string()),
        model_id: "gemini-test".to_string(),
        hotkey: "Space".to_string(),
        api_base,
        relay_url,
        proxy: None,
        data_dir,
    }
}
