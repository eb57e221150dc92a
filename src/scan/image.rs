//! Image preparation for the identify upload
//!
//! The classifier expects a square image, so captures and uploads are
//! cropped to the largest centered square before being re-encoded as PNG.

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Crop to the largest centered square
///
/// A 640x480 frame becomes the middle 480x480; an already-square image
/// is returned unchanged.
#[must_use]
pub fn crop_centered_square(img: &DynamicImage) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    if w == h {
        return img.clone();
    }

    let side = w.min(h);
    let x = (w - side) / 2;
    let y = (h - side) / 2;
    img.crop_imm(x, y, side, side)
}

/// Encode as PNG bytes for the multipart upload
///
/// # Errors
///
/// Returns the `image` crate's error string if encoding fails.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, String> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(buf.into_inner())
}
