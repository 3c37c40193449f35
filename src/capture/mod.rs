//! Screen capture domain: public API.
//!
//! Grabs the primary display (or loads an image file), scales it down,
//! encodes it as JPEG and keeps a copy on disk next to the store.
//! External code should only use the items exported here.

mod encode;
mod screenshot;

pub use encode::{encode_jpeg, scale_to_max_width, JPEG_QUALITY, MAX_WIDTH, MIN_JPEG_BYTES};
pub use screenshot::{capture_primary_display, load_screenshot_file};

use base64::Engine;
use std::path::{Path, PathBuf};

/// An encoded screenshot ready to send to the model.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub path: PathBuf,
    pub jpeg: Vec<u8>,
}

impl Screenshot {
    pub fn base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.jpeg)
    }

    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.base64())
    }
}

/// Write `jpeg` to `<data_dir>/screenshots/shot-<epoch_ms>.jpg`.
pub(crate) fn save_jpeg(data_dir: &Path, jpeg: Vec<u8>) -> crate::Result<Screenshot> {
    let shots = data_dir.join("screenshots");
    std::fs::create_dir_all(&shots)?;
    let path = shots.join(format!("shot-{}.jpg", crate::epoch_ms()));
    std::fs::write(&path, &jpeg)?;
    log::info!("[CAPTURE] Saved {} ({} bytes)", path.display(), jpeg.len());
    Ok(Screenshot { path, jpeg })
}
