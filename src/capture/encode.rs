//! Downscale + JPEG encode.

use crate::error::{CompanionError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

/// Screenshots wider than this are scaled down.
pub const MAX_WIDTH: u32 = 1600;
pub const JPEG_QUALITY: u8 = 85;
/// Anything smaller is treated as a failed encode.
pub const MIN_JPEG_BYTES: usize = 1024;

/// Scale to at most [`MAX_WIDTH`] wide, keeping aspect ratio.
pub fn scale_to_max_width(image: DynamicImage) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    if w <= MAX_WIDTH || w == 0 {
        return image;
    }
    let out_h = ((h as f64) * (MAX_WIDTH as f64 / w as f64)).round().max(1.0) as u32;
    image.resize_exact(MAX_WIDTH, out_h, FilterType::Triangle)
}

/// Encode as JPEG at [`JPEG_QUALITY`]. Results under
/// [`MIN_JPEG_BYTES`] are rejected.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&rgb)?;
    if bytes.len() < MIN_JPEG_BYTES {
        return Err(CompanionError::EncodedTooSmall(bytes.len()));
    }
    Ok(bytes)
}

#[cfg(test)]
pub(crate) fn noise_image(w: u32, h: u32) -> DynamicImage {
    // xorshift noise compresses poorly, so the JPEG clears MIN_JPEG_BYTES.
    let mut state: u32 = 0x9E37_79B9;
    let img = image::RgbImage::from_fn(w, h, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        image::Rgb([r, g, b])
    });
    DynamicImage::ImageRgb8(img)
}
