//! Transform engine: per-image rotation and mirroring.
//!
//! Rotation is applied before the flip. [`crate::Session::rotate_by`]
//! relies on that order when it inverts rotation deltas for mirrored
//! images; changing it would break the visual direction of the rotate
//! buttons.

mod rotation;

pub use rotation::{compute_rotated_bounds, rotate};

use crate::TransformState;
use image::DynamicImage;

/// Apply a transform record: rotation first, then the left-right mirror.
///
/// Quarter turns are lossless pixel shuffles; any other angle goes
/// through interpolated resampling with canvas expansion. Pure; the
/// input is never mutated.
pub fn apply_transform(image: &DynamicImage, state: &TransformState) -> DynamicImage {
    let rotated = match state.rotation() {
        0 => image.clone(),
        // Positive rotation is counter-clockwise; the image crate's
        // helpers are named for clockwise turns.
        90 => image.rotate270(),
        180 => image.rotate180(),
        270 => image.rotate90(),
        angle => rotation::rotate(image, f64::from(angle)),
    };

    if state.flipped() {
        rotated.fliph()
    } else {
        rotated
    }
}
