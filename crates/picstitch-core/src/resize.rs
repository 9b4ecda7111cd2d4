//! Resize engine: bring a batch to a common width or height.

use image::imageops::FilterType;
use image::DynamicImage;

use crate::options::{Alignment, TargetSize};
use crate::progress::ProgressSink;

/// Resize every image for the merge axis, preserving each image's own
/// aspect ratio.
///
/// Vertical alignment scales to a common width, horizontal to a common
/// height. `KeepOriginal` returns the batch unchanged. Resampling is
/// Lanczos3. Progress is reported once per image in `0..=100`.
pub fn resize_batch(
    images: Vec<DynamicImage>,
    size: TargetSize,
    align: Alignment,
    progress: &mut dyn ProgressSink,
) -> Vec<DynamicImage> {
    let total = images.len();
    images
        .into_iter()
        .enumerate()
        .map(|(index, image)| {
            let resized = match size {
                TargetSize::KeepOriginal => image,
                TargetSize::Pixels(target) => resize_one(image, target, align),
            };
            progress.update((index + 1) as f32 / total as f32 * 100.0);
            resized
        })
        .collect()
}

fn resize_one(image: DynamicImage, target: u32, align: Alignment) -> DynamicImage {
    let target = target.max(1);
    let (width, height) = (image.width(), image.height());

    let (new_width, new_height) = match align {
        // Horizontal merge: the target is a common height.
        Alignment::Horizontal => {
            let ratio = f64::from(target) / f64::from(height);
            let scaled = (f64::from(width) * ratio).round() as u32;
            (scaled.max(1), target)
        }
        // Vertical merge: the target is a common width.
        Alignment::Vertical => {
            let ratio = f64::from(target) / f64::from(width);
            let scaled = (f64::from(height) * ratio).round() as u32;
            (target, scaled.max(1))
        }
    };

    if (new_width, new_height) == (width, height) {
        return image;
    }
    log::debug!("resizing {width}x{height} to {new_width}x{new_height}");
    image.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Discard;
    use image::RgbImage;

    fn blank(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
    }

    fn sizes(images: &[DynamicImage]) -> Vec<(u32, u32)> {
        images.iter().map(|i| (i.width(), i.height())).collect()
    }

    #[test]
    fn test_vertical_scales_to_common_width() {
        let batch = vec![blank(100, 50), blank(200, 100), blank(50, 200)];
        let out = resize_batch(batch, TargetSize::Pixels(100), Alignment::Vertical, &mut Discard);
        assert_eq!(sizes(&out), vec![(100, 50), (100, 50), (100, 400)]);
    }

    #[test]
    fn test_horizontal_scales_to_common_height() {
        let batch = vec![blank(200, 50), blank(100, 200)];
        let out = resize_batch(batch, TargetSize::Pixels(100), Alignment::Horizontal, &mut Discard);
        assert_eq!(sizes(&out), vec![(400, 100), (50, 100)]);
    }

    #[test]
    fn test_secondary_dimension_rounds() {
        // 333 * (50 / 100) = 166.5 rounds up.
        let out = resize_batch(
            vec![blank(100, 333)],
            TargetSize::Pixels(50),
            Alignment::Vertical,
            &mut Discard,
        );
        assert_eq!(sizes(&out), vec![(50, 167)]);
    }

    #[test]
    fn test_aspect_ratio_preserved() {
        let out = resize_batch(
            vec![blank(643, 401)],
            TargetSize::Pixels(200),
            Alignment::Vertical,
            &mut Discard,
        );
        let (w, h) = (out[0].width() as f64, out[0].height() as f64);
        let original = 643.0 / 401.0;
        assert!((w / h - original).abs() < 0.02, "ratio drifted to {}", w / h);
    }

    #[test]
    fn test_keep_original_is_identity() {
        let batch = vec![blank(123, 45), blank(6, 789)];
        let out = resize_batch(batch, TargetSize::KeepOriginal, Alignment::Vertical, &mut Discard);
        assert_eq!(sizes(&out), vec![(123, 45), (6, 789)]);
    }

    #[test]
    fn test_progress_per_image() {
        let mut seen = Vec::new();
        resize_batch(
            vec![blank(10, 10), blank(10, 10), blank(10, 10), blank(10, 10)],
            TargetSize::KeepOriginal,
            Alignment::Vertical,
            &mut |p: f32| seen.push(p),
        );
        assert_eq!(seen, vec![25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_empty_batch() {
        let mut seen = Vec::new();
        let out = resize_batch(
            Vec::new(),
            TargetSize::Pixels(100),
            Alignment::Vertical,
            &mut |p: f32| seen.push(p),
        );
        assert!(out.is_empty());
        assert!(seen.is_empty());
    }

    #[test]
    fn test_upscaling_works() {
        let out = resize_batch(
            vec![blank(50, 25)],
            TargetSize::Pixels(100),
            Alignment::Vertical,
            &mut Discard,
        );
        assert_eq!(sizes(&out), vec![(100, 50)]);
    }
}
