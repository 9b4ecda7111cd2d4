//! Filter engine: per-image color adjustments.
//!
//! Applies, in this fixed order, whichever adjustments differ from their
//! defaults:
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//! 4. Posterize
//!
//! Each step feeds the next. The engine is pure and never fails; callers
//! clamp values to the documented ranges.

use color_quant::NeuQuant;
use image::{DynamicImage, RgbaImage};

use crate::FilterSettings;

/// ITU-R BT.709 luminance coefficients.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// NeuQuant sampling factor: 1 = slowest/best, 30 = fastest.
const QUANT_SAMPLE_FACTOR: i32 = 10;

/// Apply a filter record to an image, returning the adjusted copy.
///
/// A record at its defaults returns an unchanged clone. Alpha passes
/// through untouched; only the color channels are adjusted.
pub fn apply_filters(image: &DynamicImage, filters: &FilterSettings) -> DynamicImage {
    if filters.is_default() {
        return image.clone();
    }

    let mut rgba = image.to_rgba8();

    let has_point_ops =
        filters.brightness != 1.0 || filters.contrast != 1.0 || filters.saturation != 1.0;
    if has_point_ops {
        for chunk in rgba.chunks_exact_mut(4) {
            let mut r = chunk[0] as f32 / 255.0;
            let mut g = chunk[1] as f32 / 255.0;
            let mut b = chunk[2] as f32 / 255.0;

            (r, g, b) = apply_brightness(r, g, b, filters.brightness);
            (r, g, b) = apply_contrast(r, g, b, filters.contrast);
            (r, g, b) = apply_saturation(r, g, b, filters.saturation);

            chunk[0] = (r.clamp(0.0, 1.0) * 255.0) as u8;
            chunk[1] = (g.clamp(0.0, 1.0) * 255.0) as u8;
            chunk[2] = (b.clamp(0.0, 1.0) * 255.0) as u8;
        }
    }

    // Posterize only kicks in above 1.0; at or below it is a no-op.
    if filters.posterize > 1.0 {
        rgba = apply_posterize(rgba, filters.posterize);
    }

    DynamicImage::ImageRgba8(rgba)
}

/// Scale all channels linearly. 1.0 = unchanged, 0.0 = black.
#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, brightness: f32) -> (f32, f32, f32) {
    if brightness == 1.0 {
        return (r, g, b);
    }
    (r * brightness, g * brightness, b * brightness)
}

/// Scale the deviation from mid-gray. 1.0 = unchanged.
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, contrast: f32) -> (f32, f32, f32) {
    if contrast == 1.0 {
        return (r, g, b);
    }
    let midpoint = 0.5;
    (
        (r - midpoint) * contrast + midpoint,
        (g - midpoint) * contrast + midpoint,
        (b - midpoint) * contrast + midpoint,
    )
}

/// Scale each channel's deviation from its pixel's gray value.
/// 1.0 = unchanged, 0.0 = grayscale.
#[inline]
fn apply_saturation(r: f32, g: f32, b: f32, saturation: f32) -> (f32, f32, f32) {
    if saturation == 1.0 {
        return (r, g, b);
    }
    let gray = luminance(r, g, b);
    (
        gray + (r - gray) * saturation,
        gray + (g - gray) * saturation,
        gray + (b - gray) * saturation,
    )
}

#[inline]
fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Quantize to an adaptive palette and expand back to full color.
///
/// Palette size: `clamp(round(256 / (1 + (amount - 1) * 3)), 2, 256)`,
/// so a full-strength `amount` of 3.0 leaves 37 colors.
fn apply_posterize(rgba: RgbaImage, amount: f32) -> RgbaImage {
    let colors = (256.0 / (1.0 + (amount - 1.0) * 3.0))
        .round()
        .clamp(2.0, 256.0) as usize;
    if colors >= 256 {
        return rgba;
    }
    log::debug!("posterizing to an adaptive palette of {colors} colors");

    let quantizer = NeuQuant::new(QUANT_SAMPLE_FACTOR, colors, rgba.as_raw());
    let palette = quantizer.color_map_rgba();

    let mut out = rgba;
    for chunk in out.chunks_exact_mut(4) {
        let index = quantizer.index_of(chunk);
        chunk[0] = palette[index * 4];
        chunk[1] = palette[index * 4 + 1];
        chunk[2] = palette[index * 4 + 2];
        // Alpha keeps its original value.
    }
    out
}
