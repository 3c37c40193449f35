//! Crate-wide error type.
//!
//! The comment extractor and the layout engine are total and never produce
//! these. Everything around them (capture, model call, store) does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompanionError {
    #[error("GOOGLE_API_KEY is not set (checked env and OS keychain)")]
    MissingApiKey,

    #[error("screen capture failed: {0}")]
    Capture(String),

    #[error("screen capture returned an empty image")]
    EmptyCapture,

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("encoded screenshot is too small ({0} bytes)")]
    EncodedTooSmall(usize),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model returned an empty reply")]
    EmptyReply,

    #[error("a capture is already in flight")]
    Busy,

    #[error("keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompanionError>;
