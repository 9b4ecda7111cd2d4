//! PNG/JPEG encoding and saving of merge results.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};
use thiserror::Error;

use crate::options::OutputFormat;

/// JPEG quality used when saving results.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors surfaced by the encode boundary.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The encoder itself failed.
    #[error("image encoding failed: {0}")]
    EncodingFailed(String),

    /// I/O error while writing the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Encode an image as JPEG bytes.
///
/// JPEG has no alpha channel, so the image is flattened to RGB first.
/// Quality is clamped to `1..=100`.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let quality = quality.clamp(1, 100);
    let rgb = image.to_rgb8();

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Encode `image` in `format` and write it to `path`.
pub fn save_image(image: &DynamicImage, path: &Path, format: OutputFormat) -> Result<(), EncodeError> {
    let bytes = match format {
        OutputFormat::Png => encode_png(image)?,
        OutputFormat::Jpg => encode_jpeg(image, DEFAULT_JPEG_QUALITY)?,
    };
    std::fs::write(path, bytes)?;
    log::info!("saved {} result to {}", format.extension(), path.display());
    Ok(())
}
