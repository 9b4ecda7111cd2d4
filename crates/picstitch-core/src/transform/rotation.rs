//! Arbitrary-angle rotation with canvas expansion.
//!
//! Uses inverse mapping: every output pixel samples the source location
//! it came from, with bilinear interpolation. Output pixels with no
//! source underneath stay transparent, which the compositor later
//! flattens onto its white canvas.

use image::{DynamicImage, Rgba, RgbaImage};

/// Bounding box of a `width` x `height` rectangle rotated by
/// `angle_degrees`, so no pixel is cropped.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let normalized = angle_degrees.rem_euclid(360.0);

    // Exact quarter turns keep or swap the dimensions.
    if normalized < 0.001 || 360.0 - normalized < 0.001 || (normalized - 180.0).abs() < 0.001 {
        return (width, height);
    }
    if (normalized - 90.0).abs() < 0.001 || (normalized - 270.0).abs() < 0.001 {
        return (height, width);
    }

    let rad = normalized.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    let (w, h) = (f64::from(width), f64::from(height));

    let out_w = (w * cos + h * sin).round() as u32;
    let out_h = (w * sin + h * cos).round() as u32;
    (out_w.max(1), out_h.max(1))
}

/// Rotate `angle_degrees` counter-clockwise around the image center,
/// expanding the canvas to the rotated bounding box.
pub fn rotate(image: &DynamicImage, angle_degrees: f64) -> DynamicImage {
    let normalized = angle_degrees.rem_euclid(360.0);
    if normalized < 0.001 || 360.0 - normalized < 0.001 {
        return image.clone();
    }

    let src = image.to_rgba8();
    let (src_w, src_h) = src.dimensions();
    let (dst_w, dst_h) = compute_rotated_bounds(src_w, src_h, normalized);

    // Screen coordinates point y down, so the inverse of a visually
    // counter-clockwise rotation is the plain rotation matrix of +angle.
    let rad = normalized.to_radians();
    let (sin, cos) = rad.sin_cos();

    let src_cx = f64::from(src_w) / 2.0;
    let src_cy = f64::from(src_h) / 2.0;
    let dst_cx = f64::from(dst_w) / 2.0;
    let dst_cy = f64::from(dst_h) / 2.0;

    // Sample at pixel centers so exact quarter turns land on the grid.
    let mut out = RgbaImage::new(dst_w, dst_h);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - dst_cx;
        let dy = f64::from(y) + 0.5 - dst_cy;
        let src_x = dx * cos - dy * sin + src_cx - 0.5;
        let src_y = dx * sin + dy * cos + src_cy - 0.5;
        *pixel = sample_bilinear(&src, src_x, src_y);
    }

    DynamicImage::ImageRgba8(out)
}

/// Weighted average of the four pixels around `(x, y)`; transparent when
/// the point falls outside the source.
fn sample_bilinear(src: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let max_x = f64::from(src.width() - 1);
    let max_y = f64::from(src.height() - 1);
    if x < 0.0 || y < 0.0 || x > max_x || y > max_y {
        return Rgba([0, 0, 0, 0]);
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(src.width() - 1);
    let y1 = (y0 + 1).min(src.height() - 1);
    let fx = x - f64::from(x0);
    let fy = y - f64::from(y0);

    let p00 = src.get_pixel(x0, y0).0;
    let p10 = src.get_pixel(x1, y0).0;
    let p01 = src.get_pixel(x0, y1).0;
    let p11 = src.get_pixel(x1, y1).0;

    let mut result = [0u8; 4];
    for c in 0..4 {
        let v = f64::from(p00[c]) * (1.0 - fx) * (1.0 - fy)
            + f64::from(p10[c]) * fx * (1.0 - fy)
            + f64::from(p01[c]) * (1.0 - fx) * fy
            + f64::from(p11[c]) * fx * fy;
        result[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    Rgba(result)
}
