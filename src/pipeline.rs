//! Capture-to-comment pipeline.
//!
//! capture → prompts (with the previous reply) → model call → extract →
//! pad → record. One run at a time; a second trigger while one is in
//! flight is rejected with [`CompanionError::Busy`].

use crate::capture::{self, Screenshot};
use crate::comment;
use crate::config::{AppConfig, PROMPT_VERSION};
use crate::error::{CompanionError, Result};
use crate::llm::{self, CommentRequest, DEFAULT_PERSONA};
use crate::overlay::TriggerGate;
use crate::store::{CommentRecord, Store, COMMENT_DURATION_MS};
use std::path::PathBuf;

/// Shown in the tooltip when a run fails.
pub const ERROR_MESSAGE: &str = "코멘트 생성 중 오류가 발생했습니다. 다시 시도해주세요.";

/// Where the screenshot comes from.
#[derive(Debug, Clone)]
pub enum ShotSource {
    /// The primary display, grabbed now.
    Live,
    /// An existing image file.
    File(PathBuf),
}

/// Run one capture and store the resulting comment.
pub async fn run_capture_and_comment(
    config: &AppConfig,
    store: &Store,
    gate: &TriggerGate,
    user_input: &str,
    source: ShotSource,
) -> Result<CommentRecord> {
    let _guard = gate.try_begin().ok_or(CompanionError::Busy)?;
    if config.api_key.is_none() {
        return Err(CompanionError::MissingApiKey);
    }

    let pipeline_start = std::time::Instant::now();

    let data_dir = config.data_dir.clone();
    let shot: Screenshot = tokio::task::spawn_blocking(move || match source {
        ShotSource::Live => capture::capture_primary_display(&data_dir),
        ShotSource::File(path) => capture::load_screenshot_file(&path, &data_dir),
    })
    .await
    .map_err(|e| CompanionError::Capture(e.to_string()))??;
    let capture_ms = pipeline_start.elapsed().as_millis();

    let previous = store.previous_message()?;
    let request = CommentRequest {
        image_base64: Some(shot.base64()),
        system_instruction: llm::build_system_instruction(&DEFAULT_PERSONA),
        user_prompt: llm::build_user_prompt(previous.as_deref(), user_input),
    };

    let llm_start = std::time::Instant::now();
    let raw = llm::generate_comment(config, &request).await?;
    let llm_ms = llm_start.elapsed().as_millis();

    let extraction = comment::extract(&raw);
    let message = comment::pad_for_display(&extraction.text);

    let created_at = crate::epoch_ms();
    let record = CommentRecord {
        id: CommentRecord::make_id(created_at, &raw),
        created_at,
        screenshot_path: shot.path.display().to_string(),
        message,
        raw_message: raw,
        duration_ms: COMMENT_DURATION_MS,
        model: config.model_id.clone(),
        prompt_version: PROMPT_VERSION.to_string(),
        tier: Some(extraction.tier),
    };
    store.push_comment(record.clone())?;

    log::info!(
        "[PIPELINE] capture {}ms, model {}ms, total {}ms ({:?})",
        capture_ms,
        llm_ms,
        pipeline_start.elapsed().as_millis(),
        extraction.tier
    );
    Ok(record)
}

/// Text for the tooltip after a run: the comment, or the fixed error line.
pub fn display_text(result: &Result<CommentRecord>) -> String {
    match result {
        Ok(record) => record.message.clone(),
        Err(e) => {
            log::error!("[PIPELINE] {}", e);
            comment::pad_for_display(ERROR_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("screen-companion-pipeline-{}-{}", name, std::process::id()))
    }

    fn config(dir: PathBuf) -> AppConfig {
        AppConfig {
            api_key: None,
            model_id: "test-model".to_string(),
            hotkey: "Space".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            relay_url: None,
            proxy: None,
            data_dir: dir,
        }
    }

    #[tokio::test]
    async fn busy_gate_rejects_second_run() {
        let dir = test_dir("busy");
        let store = Store::open(&dir).unwrap();
        let gate = TriggerGate::new();
        let _held = gate.try_begin().unwrap();

        let err = run_capture_and_comment(&config(dir.clone()), &store, &gate, "", ShotSource::Live)
            .await
            .unwrap_err();
        assert!(matches!(err, CompanionError::Busy));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn missing_key_releases_gate() {
        let dir = test_dir("nokey");
        let store = Store::open(&dir).unwrap();
        let gate = TriggerGate::new();

        let err = run_capture_and_comment(&config(dir.clone()), &store, &gate, "", ShotSource::Live)
            .await
            .unwrap_err();
        assert!(matches!(err, CompanionError::MissingApiKey));
        assert!(!gate.is_busy());
        assert!(store.read().unwrap().comments.is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn errors_display_fixed_message() {
        let text = display_text(&Err(CompanionError::EmptyReply));
        assert_eq!(text, format!("\u{a0}{ERROR_MESSAGE}"));
    }
}
