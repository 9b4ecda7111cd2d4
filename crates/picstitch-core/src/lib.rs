//! Picstitch Core - Image merge pipeline
//!
//! This crate provides the core processing functionality for Picstitch:
//! per-image transform/filter state, the engines that apply them, and the
//! orchestrator that merges an ordered batch of images into one canvas.
//!
//! The GUI shell (file list, dialogs, config persistence) lives elsewhere
//! and talks to this crate through [`Session`], [`MergeOptions`] and
//! [`merge`].

pub mod codec;
pub mod compose;
pub mod filters;
pub mod merge;
pub mod options;
pub mod progress;
pub mod resize;
pub mod session;
pub mod transform;

pub use compose::{composite, ComposeError};
pub use filters::apply_filters;
pub use merge::{merge, MergeError, MergeOutput};
pub use options::{Alignment, MergeOptions, OutputFormat, Spacing, TargetSize};
pub use progress::{Discard, ProgressSink};
pub use resize::resize_batch;
pub use session::Session;
pub use transform::apply_transform;

/// Per-image rotation/flip record.
///
/// `rotation` is in degrees, positive = counter-clockwise, and is kept
/// normalized to `[0, 360)` by every mutator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransformState {
    rotation: i32,
    flipped: bool,
}

impl TransformState {
    /// Create a new state with no rotation and no flip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rotation in degrees, always in `[0, 360)`.
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// Whether the image is mirrored left-right.
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Set an absolute rotation angle (reduced modulo 360).
    pub fn set_rotation(&mut self, angle: i32) {
        self.rotation = angle.rem_euclid(360);
    }

    /// Add a relative rotation (reduced modulo 360).
    pub fn add_rotation(&mut self, delta: i32) {
        self.rotation = (self.rotation + delta).rem_euclid(360);
    }

    /// Toggle the left-right mirror flag.
    pub fn toggle_flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Back to no rotation, no flip.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when the state would leave an image untouched.
    pub fn is_default(&self) -> bool {
        self.rotation == 0 && !self.flipped
    }

    /// True when the state differs from the default.
    pub fn is_modified(&self) -> bool {
        !self.is_default()
    }
}

/// Tolerance used when deciding whether a filter value is at its default.
pub const FILTER_DEFAULT_TOLERANCE: f32 = 1e-2;

/// Per-image color adjustment record.
///
/// Each value defaults to `1.0` (no change). Intended range is
/// `0.0..=3.0`; posterize only takes effect above `1.0`. The UI clamps
/// input ranges, the engines do not.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterSettings {
    /// Brightness multiplier (1.0 = unchanged).
    pub brightness: f32,
    /// Contrast around mid-gray (1.0 = unchanged).
    pub contrast: f32,
    /// Color intensity (1.0 = unchanged, 0.0 = grayscale).
    pub saturation: f32,
    /// Palette reduction strength (values <= 1.0 are a no-op).
    pub posterize: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            posterize: 1.0,
        }
    }
}

/// Names the four adjustable filter values, for slider-style callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Brightness,
    Contrast,
    Saturation,
    Posterize,
}

impl FilterSettings {
    /// Create a new record with every value at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one value by name.
    pub fn get(&self, kind: FilterKind) -> f32 {
        match kind {
            FilterKind::Brightness => self.brightness,
            FilterKind::Contrast => self.contrast,
            FilterKind::Saturation => self.saturation,
            FilterKind::Posterize => self.posterize,
        }
    }

    /// Set one value by name.
    pub fn set(&mut self, kind: FilterKind, value: f32) {
        match kind {
            FilterKind::Brightness => self.brightness = value,
            FilterKind::Contrast => self.contrast = value,
            FilterKind::Saturation => self.saturation = value,
            FilterKind::Posterize => self.posterize = value,
        }
    }

    /// Back to all defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when every value is within tolerance of 1.0.
    pub fn is_default(&self) -> bool {
        [self.brightness, self.contrast, self.saturation, self.posterize]
            .iter()
            .all(|v| (v - 1.0).abs() < FILTER_DEFAULT_TOLERANCE)
    }

    /// True when any value differs from its default.
    pub fn is_modified(&self) -> bool {
        !self.is_default()
    }
}
