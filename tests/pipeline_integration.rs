//! End-to-end pipeline tests against a local mock of the model API.
//!
//! No network access needed: the direct endpoint and the relay both point
//! at an axum router on 127.0.0.1.

mod mock_gemini;

use mock_gemini::{candidates_json, config, temp_dir, write_test_png, MockServer};
use screen_companion_lib::comment::{Tier, DISPLAY_PAD};
use screen_companion_lib::overlay::TriggerGate;
use screen_companion_lib::pipeline::{self, ShotSource, ERROR_MESSAGE};
use screen_companion_lib::store::Store;
use screen_companion_lib::CompanionError;

const REPLY: &str = "1) 현재 발화 맥락 요약: 선생님이 차트를 보는 중\n\
                     2) 중요사항:\n- 3분기 매출 급감\n\
                     3) 코멘트: 3분기 원인부터 짚어보자.";

#[tokio::test]
async fn direct_call_stores_extracted_comment() {
    let server = MockServer::start(|_| (200, candidates_json(REPLY))).await;
    let dir = temp_dir("direct");
    let png = write_test_png(&dir);
    let cfg = config(server.base_url(), None, dir.clone());
    let store = Store::open(&dir).unwrap();
    let gate = TriggerGate::new();

    let record = pipeline::run_capture_and_comment(&cfg, &store, &gate, "이거 왜 떨어졌어?", ShotSource::File(png))
        .await
        .unwrap();

    assert_eq!(record.message, format!("{DISPLAY_PAD}3분기 원인부터 짚어보자."));
    assert_eq!(record.raw_message, REPLY);
    assert_eq!(record.model, "gemini-test");
    assert_eq!(record.tier, Some(Tier::Structured));
    assert!(std::path::Path::new(&record.screenshot_path).exists());
    assert_eq!(store.previous_message().unwrap(), Some(record.message.clone()));
    assert!(!gate.is_busy());

    let requests = server.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/models/gemini-test:generateContent?key=test-key");
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert!(parts[1]["text"].as_str().unwrap().contains("[사용자 입력]\n이거 왜 떨어졌어?"));
    assert!(body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("3) 코멘트:"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn second_run_sees_previous_reply() {
    let server = MockServer::start(|_| (200, candidates_json(REPLY))).await;
    let dir = temp_dir("previous");
    let png = write_test_png(&dir);
    let cfg = config(server.base_url(), None, dir.clone());
    let store = Store::open(&dir).unwrap();
    let gate = TriggerGate::new();

    for _ in 0..2 {
        pipeline::run_capture_and_comment(&cfg, &store, &gate, "", ShotSource::File(png.clone()))
            .await
            .unwrap();
    }

    let requests = server.recorded();
    let first: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    let second: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
    assert!(first["contents"][0]["parts"][1]["text"]
        .as_str()
        .unwrap()
        .contains("[이전 답변 없음 (최초실행)]"));
    assert!(second["contents"][0]["parts"][1]["text"]
        .as_str()
        .unwrap()
        .contains("\n3분기 원인부터 짚어보자.\n"));
    let stored = store.read().unwrap().comments;
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|c| c.tier == Some(Tier::Structured)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn failed_direct_call_falls_back_to_relay() {
    let server = MockServer::start(|path| {
        if path.starts_with("/relay") {
            (200, candidates_json("3) 코멘트: 릴레이로 받았어."))
        } else {
            (503, r#"{"error":{"code":503,"message":"overloaded"}}"#.to_string())
        }
    })
    .await;
    let dir = temp_dir("relay");
    let png = write_test_png(&dir);
    let relay = format!("{}/relay", server.base_url());
    let cfg = config(server.base_url(), Some(relay), dir.clone());
    let store = Store::open(&dir).unwrap();
    let gate = TriggerGate::new();

    let record = pipeline::run_capture_and_comment(&cfg, &store, &gate, "", ShotSource::File(png))
        .await
        .unwrap();
    assert_eq!(record.message, format!("{DISPLAY_PAD}릴레이로 받았어."));
    assert_eq!(record.tier, Some(Tier::LabeledSlot));

    let requests = server.recorded();
    assert_eq!(requests.len(), 2);
    let relay_body: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
    assert_eq!(relay_body["model"], "gemini-test");
    assert!(relay_body["imageBase64"].as_str().is_some());
    assert!(relay_body["systemInstruction"].as_str().is_some());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn relay_error_is_not_shown_as_comment() {
    let server = MockServer::start(|path| {
        if path.starts_with("/relay") {
            (200, r#"{"error":"quota exceeded"}"#.to_string())
        } else {
            (500, "{}".to_string())
        }
    })
    .await;
    let dir = temp_dir("relay-error");
    let png = write_test_png(&dir);
    let relay = format!("{}/relay", server.base_url());
    let cfg = config(server.base_url(), Some(relay), dir.clone());
    let store = Store::open(&dir).unwrap();
    let gate = TriggerGate::new();

    let result =
        pipeline::run_capture_and_comment(&cfg, &store, &gate, "", ShotSource::File(png)).await;
    assert!(matches!(result, Err(CompanionError::Api { status: 500, .. })));
    assert_eq!(
        pipeline::display_text(&result),
        format!("{DISPLAY_PAD}{ERROR_MESSAGE}")
    );
    assert!(store.read().unwrap().comments.is_empty());
    assert!(!gate.is_busy());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn missing_api_key_is_reported() {
    let dir = temp_dir("no-key");
    let png = write_test_png(&dir);
    let mut cfg = config("http://127.0.0.1:9".to_string(), None, dir.clone());
    cfg.api_key = None;
    let store = Store::open(&dir).unwrap();

    let result =
        pipeline::run_capture_and_comment(&cfg, &store, &TriggerGate::new(), "", ShotSource::File(png))
            .await;
    assert!(matches!(result, Err(CompanionError::MissingApiKey)));

    let _ = std::fs::remove_dir_all(&dir);
}
