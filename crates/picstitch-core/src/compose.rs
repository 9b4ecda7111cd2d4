//! Canvas compositor: lay a batch out on one canvas with fixed spacing.

use image::{imageops, DynamicImage, Rgb, RgbImage};
use thiserror::Error;

use crate::options::Alignment;
use crate::progress::ProgressSink;

/// Errors surfaced by the compositor.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// There is nothing to lay out.
    #[error("cannot composite an empty image batch")]
    EmptyBatch,
}

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Paste `images` in order onto a single opaque white RGB canvas.
///
/// Vertical alignment stacks top-to-bottom at `x = 0`, with the canvas
/// as wide as the widest image; horizontal lays left-to-right at `y = 0`,
/// as tall as the tallest. `spacing` pixels of background separate
/// adjacent images. Alpha is dropped at the paste. Progress is reported
/// once per image in `0..=100`.
pub fn composite(
    images: &[DynamicImage],
    spacing: u32,
    align: Alignment,
    progress: &mut dyn ProgressSink,
) -> Result<DynamicImage, ComposeError> {
    if images.is_empty() {
        return Err(ComposeError::EmptyBatch);
    }

    let total = images.len();
    let gaps = spacing * (total as u32 - 1);
    let (canvas_width, canvas_height) = match align {
        Alignment::Vertical => (
            images.iter().map(DynamicImage::width).max().unwrap_or(1),
            images.iter().map(DynamicImage::height).sum::<u32>() + gaps,
        ),
        Alignment::Horizontal => (
            images.iter().map(DynamicImage::width).sum::<u32>() + gaps,
            images.iter().map(DynamicImage::height).max().unwrap_or(1),
        ),
    };
    log::debug!("compositing {total} images onto a {canvas_width}x{canvas_height} canvas");

    let mut canvas = RgbImage::from_pixel(canvas_width, canvas_height, BACKGROUND);
    let mut offset: i64 = 0;
    for (index, image) in images.iter().enumerate() {
        let rgb = image.to_rgb8();
        match align {
            Alignment::Vertical => {
                imageops::replace(&mut canvas, &rgb, 0, offset);
                offset += i64::from(image.height()) + i64::from(spacing);
            }
            Alignment::Horizontal => {
                imageops::replace(&mut canvas, &rgb, offset, 0);
                offset += i64::from(image.width()) + i64::from(spacing);
            }
        }
        progress.update((index + 1) as f32 / total as f32 * 100.0);
    }

    Ok(DynamicImage::ImageRgb8(canvas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Discard;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    fn pixel(image: &DynamicImage, x: u32, y: u32) -> [u8; 3] {
        image.to_rgb8().get_pixel(x, y).0
    }

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];
    const WHITE: [u8; 3] = [255, 255, 255];

    #[test]
    fn test_empty_batch_is_an_error() {
        let result = composite(&[], 0, Alignment::Vertical, &mut Discard);
        assert!(matches!(result, Err(ComposeError::EmptyBatch)));
    }

    #[test]
    fn test_vertical_canvas_size() {
        let batch = [
            solid(100, 200, RED),
            solid(150, 200, GREEN),
            solid(100, 300, BLUE),
        ];
        let out = composite(&batch, 30, Alignment::Vertical, &mut Discard).unwrap();
        assert_eq!(out.width(), 150);
        assert_eq!(out.height(), 200 + 200 + 300 + 2 * 30);
    }

    #[test]
    fn test_horizontal_canvas_size() {
        let batch = [solid(100, 80, RED), solid(50, 120, GREEN)];
        let out = composite(&batch, 60, Alignment::Horizontal, &mut Discard).unwrap();
        assert_eq!(out.width(), 100 + 50 + 60);
        assert_eq!(out.height(), 120);
    }

    #[test]
    fn test_vertical_layout_positions() {
        let batch = [solid(100, 200, RED), solid(150, 200, GREEN)];
        let out = composite(&batch, 30, Alignment::Vertical, &mut Discard).unwrap();

        assert_eq!(pixel(&out, 0, 0), RED);
        assert_eq!(pixel(&out, 99, 199), RED);
        // Gap row is background.
        assert_eq!(pixel(&out, 0, 210), WHITE);
        // Second image starts after the gap.
        assert_eq!(pixel(&out, 0, 230), GREEN);
        assert_eq!(pixel(&out, 149, 429), GREEN);
    }

    #[test]
    fn test_cross_axis_anchored_left() {
        // The narrow image leaves background on its right, not centered.
        let batch = [solid(100, 50, RED), solid(150, 50, GREEN)];
        let out = composite(&batch, 0, Alignment::Vertical, &mut Discard).unwrap();
        assert_eq!(pixel(&out, 99, 0), RED);
        assert_eq!(pixel(&out, 120, 0), WHITE);
    }

    #[test]
    fn test_horizontal_layout_positions() {
        let batch = [solid(40, 60, RED), solid(40, 100, GREEN)];
        let out = composite(&batch, 10, Alignment::Horizontal, &mut Discard).unwrap();

        assert_eq!(pixel(&out, 0, 0), RED);
        // Short image anchors at the top; below it is background.
        assert_eq!(pixel(&out, 0, 80), WHITE);
        // Gap column.
        assert_eq!(pixel(&out, 45, 0), WHITE);
        assert_eq!(pixel(&out, 50, 0), GREEN);
    }

    #[test]
    fn test_single_image_has_no_gap() {
        let out = composite(&[solid(30, 40, BLUE)], 90, Alignment::Vertical, &mut Discard).unwrap();
        assert_eq!((out.width(), out.height()), (30, 40));
    }

    #[test]
    fn test_zero_spacing_packs_tight() {
        let batch = [solid(10, 10, RED), solid(10, 10, GREEN)];
        let out = composite(&batch, 0, Alignment::Vertical, &mut Discard).unwrap();
        assert_eq!(out.height(), 20);
        assert_eq!(pixel(&out, 0, 9), RED);
        assert_eq!(pixel(&out, 0, 10), GREEN);
    }

    #[test]
    fn test_alpha_flattens_onto_canvas() {
        let mut rgba = image::RgbaImage::from_pixel(10, 10, image::Rgba([0, 0, 0, 0]));
        rgba.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        let batch = [DynamicImage::ImageRgba8(rgba)];
        let out = composite(&batch, 0, Alignment::Vertical, &mut Discard).unwrap();
        // Transparent pixels paste their stored color; nothing blends.
        assert_eq!(pixel(&out, 0, 0), RED);
        assert_eq!(pixel(&out, 5, 5), [0, 0, 0]);
    }

    #[test]
    fn test_progress_reaches_100() {
        let mut seen = Vec::new();
        let batch = [solid(5, 5, RED), solid(5, 5, GREEN), solid(5, 5, BLUE)];
        composite(&batch, 0, Alignment::Horizontal, &mut |p: f32| seen.push(p)).unwrap();
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last().copied(), Some(100.0));
    }
}
