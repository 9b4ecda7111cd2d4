//! Merge options and their fixed enumerations.
//!
//! These mirror the persisted configuration keys (`width`, `align`,
//! `space`, `format`); the config file itself is owned by the shell,
//! which hands a validated [`MergeOptions`] to [`crate::merge`].

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Spelling of the "keep original size" sentinel in persisted options.
pub const KEEP_ORIGINAL: &str = "keep-original";

/// Width presets offered by the shell, in pixels.
pub const WIDTH_PRESETS: [u32; 3] = [1024, 800, 640];

/// Target size for the batch resize step.
///
/// For vertical alignment the value is a width, for horizontal alignment
/// a height; [`KeepOriginal`](TargetSize::KeepOriginal) skips resizing
/// entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSize {
    /// Do not resize.
    KeepOriginal,
    /// Scale every image to this many pixels on the primary cross axis.
    Pixels(u32),
}

impl Serialize for TargetSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TargetSize::KeepOriginal => serializer.serialize_str(KEEP_ORIGINAL),
            TargetSize::Pixels(px) => serializer.serialize_u32(*px),
        }
    }
}

struct TargetSizeVisitor;

impl Visitor<'_> for TargetSizeVisitor {
    type Value = TargetSize;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{KEEP_ORIGINAL}\" or a positive pixel count")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<TargetSize, E> {
        if value == 0 || value > u64::from(u32::MAX) {
            return Err(E::custom(format!("pixel count out of range: {value}")));
        }
        Ok(TargetSize::Pixels(value as u32))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<TargetSize, E> {
        if value == KEEP_ORIGINAL {
            return Ok(TargetSize::KeepOriginal);
        }
        // Older config files store the pixel count as a string.
        match value.parse::<u32>() {
            Ok(px) if px > 0 => Ok(TargetSize::Pixels(px)),
            _ => Err(E::custom(format!("invalid width value: {value:?}"))),
        }
    }
}

impl<'de> Deserialize<'de> for TargetSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TargetSizeVisitor)
    }
}

/// Axis along which images are concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Stack top-to-bottom.
    #[default]
    Vertical,
    /// Stack left-to-right.
    Horizontal,
}

/// Gap between adjacent images on the merged canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    #[default]
    None,
    Narrow,
    Normal,
    Wide,
}

impl Spacing {
    /// Gap in pixels.
    pub fn pixels(self) -> u32 {
        match self {
            Spacing::None => 0,
            Spacing::Narrow => 30,
            Spacing::Normal => 60,
            Spacing::Wide => 90,
        }
    }
}

/// Output file format for the merged image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
}

impl OutputFormat {
    /// Lowercase extension / format tag.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
        }
    }
}

/// Options for a single merge run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Target width (vertical) or height (horizontal) for the batch.
    pub width: TargetSize,
    /// Merge axis.
    pub align: Alignment,
    /// Gap between images.
    pub space: Spacing,
    /// Output file format.
    pub format: OutputFormat,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            width: TargetSize::KeepOriginal,
            align: Alignment::Vertical,
            space: Spacing::None,
            format: OutputFormat::Png,
        }
    }
}
