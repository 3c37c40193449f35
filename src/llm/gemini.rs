//! Gemini `generateContent` call with relay fallback.
//!
//! One non-streaming request per capture. The API key goes in the URL
//! query param. When the direct call fails and `RELAY_URL` is set, the
//! same prompt is posted to the relay, which answers in the Gemini
//! response shape.

use super::types::{Content, GenerateRequest, GenerateResponse, Part, RelayRequest};
use crate::capture::MIN_JPEG_BYTES;
use crate::config::AppConfig;
use crate::error::{CompanionError, Result};

/// Everything needed for one model call.
#[derive(Debug, Clone)]
pub struct CommentRequest {
    /// Base64 JPEG, without the `data:` prefix.
    pub image_base64: Option<String>,
    pub system_instruction: String,
    pub user_prompt: String,
}

impl CommentRequest {
    /// The image, if its decoded size is large enough to be a real capture.
    fn usable_image(&self) -> Option<&str> {
        let b64 = self.image_base64.as_deref()?;
        if b64.len() * 3 / 4 >= MIN_JPEG_BYTES {
            Some(b64)
        } else {
            log::warn!(
                "[LLM] Dropping image: ~{} bytes decoded, below {}",
                b64.len() * 3 / 4,
                MIN_JPEG_BYTES
            );
            None
        }
    }
}

/// Ask the model for a comment. Returns the reply text, trimmed.
pub async fn generate_comment(config: &AppConfig, req: &CommentRequest) -> Result<String> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or(CompanionError::MissingApiKey)?;
    let client = config.http_client()?;

    log::info!("[LLM] Model: {}", config.model_id);
    let start = std::time::Instant::now();

    let direct = call_direct(&client, config, api_key, req).await;
    let err = match direct {
        Ok(text) => {
            log::info!("[LLM] Direct call: {}ms", start.elapsed().as_millis());
            return Ok(text);
        }
        Err(e) => e,
    };
    log::error!(
        "[LLM] Direct call failed after {}ms: {}",
        start.elapsed().as_millis(),
        err
    );

    let Some(relay_url) = config.relay_url.as_deref() else {
        return Err(err);
    };

    let relay_start = std::time::Instant::now();
    match call_relay(&client, config, relay_url, req).await {
        Ok(text) => {
            log::info!("[LLM] Relay call: {}ms", relay_start.elapsed().as_millis());
            Ok(text)
        }
        Err(relay_err) => {
            log::error!("[LLM] Relay failed: {}", relay_err);
            Err(err)
        }
    }
}

async fn call_direct(
    client: &reqwest::Client,
    config: &AppConfig,
    api_key: &str,
    req: &CommentRequest,
) -> Result<String> {
    let url = format!(
        "{}/models/{}:generateContent?key={}",
        config.api_base, config.model_id, api_key
    );

    let mut parts = Vec::with_capacity(2);
    if let Some(b64) = req.usable_image() {
        parts.push(Part::jpeg(b64));
    }
    parts.push(Part::text(req.user_prompt.as_str()));

    let body = GenerateRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        system_instruction: Some(Content {
            role: None,
            parts: vec![Part::text(req.system_instruction.as_str())],
        }),
    };

    let response = client
        .post(&url)
        .header("content-type", "application/json")
        .json(&body)
        .send()
        .await?;
    read_reply(response).await
}

async fn call_relay(
    client: &reqwest::Client,
    config: &AppConfig,
    relay_url: &str,
    req: &CommentRequest,
) -> Result<String> {
    log::info!("[LLM] Retrying via relay {}", relay_url);
    let body = RelayRequest {
        image_base64: req.usable_image(),
        user_prompt: &req.user_prompt,
        system_instruction: &req.system_instruction,
        model: &config.model_id,
    };
    let response = client
        .post(relay_url)
        .header("content-type", "application/json")
        .json(&body)
        .send()
        .await?;
    read_reply(response).await
}

async fn read_reply(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CompanionError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: GenerateResponse = serde_json::from_str(&body)?;
    if let Some(msg) = parsed.error_message() {
        log::warn!("[LLM] Reply carried an error: {}", msg);
    }
    let text = parsed.text().trim().to_string();
    if text.is_empty() {
        return Err(CompanionError::EmptyReply);
    }
    Ok(text)
}
