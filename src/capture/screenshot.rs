//! Primary display capture and file-based screenshots.

use super::encode::{encode_jpeg, scale_to_max_width};
use super::{save_jpeg, Screenshot};
use crate::error::{CompanionError, Result};
use image::DynamicImage;
use std::path::Path;

/// Grab attempts before giving up on an empty frame.
#[cfg(feature = "screen-capture")]
const CAPTURE_TRIES: u32 = 3;

/// Pause between attempts; right after a fullscreen switch or display
/// change the first frames can come back empty.
#[cfg(feature = "screen-capture")]
const RETRY_DELAY: std::time::Duration = std::time::Duration::from_millis(120);

/// Capture the primary monitor, scale, encode and save it.
///
/// Blocking; call from a blocking task when inside the async runtime.
pub fn capture_primary_display(data_dir: &Path) -> Result<Screenshot> {
    let start = std::time::Instant::now();
    let image = grab_primary()?;
    let grab_ms = start.elapsed().as_millis();
    log::info!(
        "[CAPTURE] Grabbed {}x{} in {}ms",
        image.width(),
        image.height(),
        grab_ms
    );
    finish(image, data_dir)
}

/// Run an existing image file through the same scale/encode/save path.
pub fn load_screenshot_file(image_path: &Path, data_dir: &Path) -> Result<Screenshot> {
    let image = image::open(image_path)?;
    log::info!(
        "[CAPTURE] Loaded {} ({}x{})",
        image_path.display(),
        image.width(),
        image.height()
    );
    finish(image, data_dir)
}

fn finish(image: DynamicImage, data_dir: &Path) -> Result<Screenshot> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CompanionError::EmptyCapture);
    }
    let start = std::time::Instant::now();
    let scaled = scale_to_max_width(image);
    let jpeg = encode_jpeg(&scaled)?;
    log::info!(
        "[CAPTURE] JPEG encode: {}ms ({} bytes)",
        start.elapsed().as_millis(),
        jpeg.len()
    );
    save_jpeg(data_dir, jpeg)
}

#[cfg(feature = "screen-capture")]
fn grab_primary() -> Result<DynamicImage> {
    for attempt in 1..=CAPTURE_TRIES {
        let monitors =
            xcap::Monitor::all().map_err(|e| CompanionError::Capture(e.to_string()))?;
        let primary = monitors
            .iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| monitors.first())
            .ok_or_else(|| CompanionError::Capture("no monitors found".to_string()))?;

        match primary.capture_image() {
            Ok(img) if img.width() > 0 && img.height() > 0 => {
                return Ok(DynamicImage::ImageRgba8(img));
            }
            Ok(_) => log::warn!("[CAPTURE] Empty frame (attempt {})", attempt),
            Err(e) => log::warn!("[CAPTURE] Grab failed (attempt {}): {}", attempt, e),
        }
        std::thread::sleep(RETRY_DELAY);
    }
    Err(CompanionError::EmptyCapture)
}

#[cfg(not(feature = "screen-capture"))]
fn grab_primary() -> Result<DynamicImage> {
    Err(CompanionError::Capture(
        "built without the `screen-capture` feature; pass --image instead".to_string(),
    ))
}
