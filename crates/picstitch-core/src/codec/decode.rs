//! Image decoding with format sniffing, a decompression-bomb guard and
//! EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};
use thiserror::Error;

/// File extensions the pipeline accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Ceiling on decoded pixel count (width x height) before a file is
/// rejected as a decompression bomb. Matches Pillow's default.
pub const MAX_DECODE_PIXELS: u64 = 178_956_970;

/// Errors surfaced by the decode boundary.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a PNG or JPEG file.
    #[error("unsupported image format (expected PNG or JPEG)")]
    UnsupportedFormat,

    /// The image would decode to more pixels than the safety ceiling.
    #[error("image too large: {pixels} pixels exceeds the {limit} pixel limit")]
    TooLarge { pixels: u64, limit: u64 },

    /// The file is recognized but cannot be decoded.
    #[error("corrupted or incomplete image file: {0}")]
    Corrupted(String),

    /// I/O error while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// True when `path` has one of the supported extensions
/// (case-insensitive). The file list uses this to filter drops; the real
/// check happens on the bytes at decode time.
pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Read and decode an image file.
pub fn decode_file(path: &Path) -> Result<DynamicImage, DecodeError> {
    let bytes = std::fs::read(path)?;
    decode_bytes(&bytes)
}

/// Decode PNG or JPEG bytes into a [`DynamicImage`].
///
/// The format is sniffed from the bytes, the header dimensions are
/// checked against [`MAX_DECODE_PIXELS`] before the pixel data is
/// touched, and EXIF orientation (JPEG) is applied to the result.
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    match reader.format() {
        Some(ImageFormat::Png | ImageFormat::Jpeg) => {}
        _ => return Err(DecodeError::UnsupportedFormat),
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;
    check_pixel_limit(width, height)?;

    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    let orientation = extract_orientation(bytes);
    if orientation != Orientation::Normal {
        log::debug!("applying EXIF orientation {orientation:?}");
    }
    Ok(apply_orientation(image, orientation))
}

fn check_pixel_limit(width: u32, height: u32) -> Result<(), DecodeError> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels > MAX_DECODE_PIXELS {
        return Err(DecodeError::TooLarge {
            pixels,
            limit: MAX_DECODE_PIXELS,
        });
    }
    Ok(())
}

/// EXIF orientation values 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90Cw,
    Transverse,
    Rotate270Cw,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90Cw,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270Cw,
            _ => Orientation::Normal,
        }
    }
}

/// Orientation from embedded EXIF data, `Normal` when absent or
/// unreadable.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(image: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => image,
        Orientation::FlipHorizontal => image.fliph(),
        Orientation::Rotate180 => image.rotate180(),
        Orientation::FlipVertical => image.flipv(),
        Orientation::Transpose => image.rotate90().fliph(),
        Orientation::Rotate90Cw => image.rotate90(),
        Orientation::Transverse => image.rotate270().fliph(),
        Orientation::Rotate270Cw => image.rotate270(),
    }
}
