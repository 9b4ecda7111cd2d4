//! Merge orchestrator: load -> per-image adjust -> batch resize ->
//! composite -> format normalization.
//!
//! Progress is split across three phases: loading with per-image
//! adjustments (0-30), batch resize (30-60) and composition (60-100).
//! A single failing image aborts the whole merge - no partial output.

use std::path::Path;

use image::DynamicImage;
use thiserror::Error;

use crate::codec::{self, DecodeError, EncodeError};
use crate::compose::{self, ComposeError};
use crate::filters;
use crate::options::{MergeOptions, OutputFormat};
use crate::progress::ProgressSink;
use crate::resize;
use crate::session::Session;
use crate::transform;

/// Errors surfaced by the merge pipeline.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// A finished merge: the composed image and the format to save it as.
#[derive(Debug)]
pub struct MergeOutput {
    pub image: DynamicImage,
    pub format: OutputFormat,
}

impl MergeOutput {
    /// Lowercase format tag (`"png"` / `"jpg"`).
    pub fn format_tag(&self) -> &'static str {
        self.format.extension()
    }

    /// Encode and write the result to `path`.
    pub fn save(&self, path: &Path) -> Result<(), EncodeError> {
        codec::save_image(&self.image, path, self.format)
    }
}

/// Merge the session's images, in list order, into one canvas.
///
/// Returns `Ok(None)` when the working set is empty - a no-op, not an
/// error; callers surface their own warning before trying to save.
pub fn merge(
    session: &Session,
    options: &MergeOptions,
    progress: &mut dyn ProgressSink,
) -> Result<Option<MergeOutput>, MergeError> {
    let paths = session.paths();
    if paths.is_empty() {
        log::warn!("merge requested with no images loaded");
        return Ok(None);
    }

    let total = paths.len();
    log::info!("merging {total} images, {:?}/{:?}", options.align, options.format);

    // Phase 1 (0-30): load each image and apply its own adjustments.
    let mut images = Vec::with_capacity(total);
    for (index, path) in paths.iter().enumerate() {
        let mut image = codec::decode_file(path)?;

        if let Some(state) = session.transform(path) {
            if state.is_modified() {
                image = transform::apply_transform(&image, state);
            }
        }
        if let Some(settings) = session.filters(path) {
            image = filters::apply_filters(&image, settings);
        }

        images.push(image);
        progress.update(index as f32 / total as f32 * 30.0);
    }

    // Phase 2 (30-60): bring the batch to a common width or height.
    let resized = resize::resize_batch(images, options.width, options.align, &mut |p: f32| {
        progress.update(30.0 + p * 0.3)
    });

    // Phase 3 (60-100): lay the batch out on the canvas.
    let composed = compose::composite(
        &resized,
        options.space.pixels(),
        options.align,
        &mut |p: f32| progress.update(60.0 + p * 0.4),
    )?;

    // JPEG has no transparency; flatten to 3-channel RGB.
    let image = match options.format {
        OutputFormat::Jpg => DynamicImage::ImageRgb8(composed.into_rgb8()),
        OutputFormat::Png => composed,
    };

    Ok(Some(MergeOutput {
        image,
        format: options.format,
    }))
}
