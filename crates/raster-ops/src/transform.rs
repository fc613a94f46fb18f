//! Geometric transformations: flip, crop, resize, scale, rotate.
//!
//! # Example
//!
//! ```rust
//! use raster_core::{PixelBuffer, Rect};
//! use raster_ops::transform::{crop, flip, resize, Flip};
//!
//! let src = PixelBuffer::filled(64, 48, [10, 20, 30, 255]).unwrap();
//!
//! let mirrored = flip(&src, Flip::Horizontal);
//! let cropped = crop(&src, Rect::new(16, 8, 32, 32)).unwrap();
//! let thumb = resize(&src, 16, 12).unwrap();
//! ```

use crate::{OpsError, OpsResult};
use raster_core::{PixelBuffer, Rect};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Flip direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// Mirror left-right.
    Horizontal,
    /// Mirror top-bottom.
    Vertical,
    /// Both axes (equivalent to a 180-degree rotation).
    Both,
}

impl Flip {
    /// Parses the single-letter direction codes `h`, `v`, `b`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "h" => Some(Self::Horizontal),
            "v" => Some(Self::Vertical),
            "b" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Returns a flipped copy of the buffer.
pub fn flip(src: &PixelBuffer, direction: Flip) -> PixelBuffer {
    trace!(?direction, "flip");
    let (width, height) = src.dimensions();
    // new() only fails on zero dimensions, which src cannot have
    let mut out = PixelBuffer::new(width, height).expect("source dimensions are valid");
    for y in 0..height {
        for x in 0..width {
            let (sx, sy) = match direction {
                Flip::Horizontal => (width - 1 - x, y),
                Flip::Vertical => (x, height - 1 - y),
                Flip::Both => (width - 1 - x, height - 1 - y),
            };
            out.put_pixel(x, y, src.pixel(sx, sy));
        }
    }
    out
}

/// Extracts a rectangular region as a new buffer.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if the rectangle is empty or
/// exceeds the source bounds.
pub fn crop(src: &PixelBuffer, region: Rect) -> OpsResult<PixelBuffer> {
    let (width, height) = src.dimensions();
    if region.is_empty() || !region.fits_within(width, height) {
        return Err(OpsError::InvalidParameter(format!(
            "crop region {}x{} at ({}, {}) exceeds source {}x{}",
            region.width, region.height, region.x, region.y, width, height
        )));
    }
    trace!(?region, "crop");
    let mut out = PixelBuffer::new(region.width, region.height)?;
    for y in 0..region.height {
        let src_row = src.row(region.y + y);
        let start = region.x as usize * 4;
        let end = start + region.width as usize * 4;
        out.row_mut(y).copy_from_slice(&src_row[start..end]);
    }
    Ok(out)
}

/// Resizes to an exact target size with bilinear sampling.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if either target dimension is
/// zero.
pub fn resize(src: &PixelBuffer, width: u32, height: u32) -> OpsResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "resize target must be positive, got {width}x{height}"
        )));
    }
    let (sw, sh) = src.dimensions();
    debug!(sw, sh, width, height, "resize");
    if (sw, sh) == (width, height) {
        return Ok(src.clone());
    }

    let x_ratio = sw as f64 / width as f64;
    let y_ratio = sh as f64 / height as f64;

    let mut out = PixelBuffer::new(width, height)?;
    for y in 0..height {
        // Center-aligned sample positions, clamped to the source extent.
        let fy = ((y as f64 + 0.5) * y_ratio - 0.5).clamp(0.0, sh as f64 - 1.0);
        let y0 = fy.floor() as u32;
        let y1 = (y0 + 1).min(sh - 1);
        let ty = fy - y0 as f64;
        for x in 0..width {
            let fx = ((x as f64 + 0.5) * x_ratio - 0.5).clamp(0.0, sw as f64 - 1.0);
            let x0 = fx.floor() as u32;
            let x1 = (x0 + 1).min(sw - 1);
            let tx = fx - x0 as f64;

            let p00 = src.pixel(x0, y0);
            let p10 = src.pixel(x1, y0);
            let p01 = src.pixel(x0, y1);
            let p11 = src.pixel(x1, y1);

            let mut px = [0u8; 4];
            for c in 0..4 {
                let top = p00[c] as f64 * (1.0 - tx) + p10[c] as f64 * tx;
                let bottom = p01[c] as f64 * (1.0 - tx) + p11[c] as f64 * tx;
                px[c] = (top * (1.0 - ty) + bottom * ty).round() as u8;
            }
            out.put_pixel(x, y, px);
        }
    }
    Ok(out)
}

/// Scales to fit within `width x height`, preserving aspect ratio based on
/// the largest source dimension.
pub fn scale(src: &PixelBuffer, width: u32, height: u32) -> OpsResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "scale target must be positive, got {width}x{height}"
        )));
    }
    let (sw, sh) = src.dimensions();
    let (tw, th) = if sw > sh {
        (width, ((sh as f64 * width as f64 / sw as f64).round() as u32).max(1))
    } else if sw < sh {
        ((((sw as f64 * height as f64 / sh as f64).round() as u32).max(1)), height)
    } else {
        (width, height)
    };
    resize(src, tw, th)
}

/// Rotates by an arbitrary angle in degrees, counter-clockwise, onto an
/// expanded canvas with transparent fill. Nearest-neighbor sampling.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `degrees` is outside
/// `[-360, 360]`.
pub fn rotate(src: &PixelBuffer, degrees: i32) -> OpsResult<PixelBuffer> {
    if !(-360..=360).contains(&degrees) {
        return Err(OpsError::InvalidParameter(format!(
            "rotation must be -360..=360 degrees, got {degrees}"
        )));
    }
    let degrees = degrees.rem_euclid(360);
    let (width, height) = src.dimensions();
    debug!(width, height, degrees, "rotate");

    // Right-angle fast paths keep pixels exact.
    match degrees {
        0 => return Ok(src.clone()),
        90 | 180 | 270 => return Ok(rotate_right_angle(src, degrees)),
        _ => {}
    }

    let radians = (degrees as f64).to_radians();
    let (sin, cos) = radians.sin_cos();

    // Expanded bounding box of the rotated source.
    let new_w = (width as f64 * cos.abs() + height as f64 * sin.abs()).ceil() as u32;
    let new_h = (width as f64 * sin.abs() + height as f64 * cos.abs()).ceil() as u32;
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let ncx = new_w as f64 / 2.0;
    let ncy = new_h as f64 / 2.0;

    let mut out = PixelBuffer::new(new_w.max(1), new_h.max(1))?;
    for y in 0..out.height() {
        for x in 0..out.width() {
            // Inverse mapping: rotate the output coordinate back into the
            // source frame; counter-clockwise output means clockwise inverse.
            let dx = x as f64 + 0.5 - ncx;
            let dy = y as f64 + 0.5 - ncy;
            let sx = dx * cos - dy * sin + cx - 0.5;
            let sy = dx * sin + dy * cos + cy - 0.5;
            let (rx, ry) = (sx.round(), sy.round());
            if rx >= 0.0 && ry >= 0.0 && (rx as u32) < width && (ry as u32) < height {
                out.put_pixel(x, y, src.pixel(rx as u32, ry as u32));
            }
        }
    }
    Ok(out)
}

fn rotate_right_angle(src: &PixelBuffer, degrees: i32) -> PixelBuffer {
    let (width, height) = src.dimensions();
    let (nw, nh) = match degrees {
        90 | 270 => (height, width),
        _ => (width, height),
    };
    let mut out = PixelBuffer::new(nw, nh).expect("source dimensions are valid");
    for y in 0..height {
        for x in 0..width {
            // Counter-clockwise rotation of (x, y) into the new frame.
            let (nx, ny) = match degrees {
                90 => (y, width - 1 - x),
                180 => (width - 1 - x, height - 1 - y),
                _ => (height - 1 - y, x),
            };
            out.put_pixel(nx, ny, src.pixel(x, y));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                buf.put_pixel(x, y, [(x * 10) as u8, (y * 10) as u8, 0, 255]);
            }
        }
        buf
    }

    #[test]
    fn test_flip_horizontal() {
        let src = numbered(4, 2);
        let out = flip(&src, Flip::Horizontal);
        assert_eq!(out.get(0, 0).unwrap(), src.get(3, 0).unwrap());
        assert_eq!(out.get(3, 1).unwrap(), src.get(0, 1).unwrap());
    }

    #[test]
    fn test_flip_both_equals_h_then_v() {
        let src = numbered(5, 3);
        let both = flip(&src, Flip::Both);
        let chained = flip(&flip(&src, Flip::Horizontal), Flip::Vertical);
        assert_eq!(both, chained);
    }

    #[test]
    fn test_flip_parse() {
        assert_eq!(Flip::parse("h"), Some(Flip::Horizontal));
        assert_eq!(Flip::parse("b"), Some(Flip::Both));
        assert_eq!(Flip::parse("x"), None);
    }

    #[test]
    fn test_crop_extracts_region() {
        let src = numbered(8, 8);
        let out = crop(&src, Rect::new(2, 3, 4, 2)).unwrap();
        assert_eq!(out.dimensions(), (4, 2));
        assert_eq!(out.get(0, 0).unwrap(), src.get(2, 3).unwrap());
        assert_eq!(out.get(3, 1).unwrap(), src.get(5, 4).unwrap());
    }

    #[test]
    fn test_crop_rejects_out_of_bounds() {
        let src = numbered(8, 8);
        assert!(crop(&src, Rect::new(5, 5, 4, 4)).is_err());
        assert!(crop(&src, Rect::new(0, 0, 0, 4)).is_err());
    }

    #[test]
    fn test_resize_dimensions_and_flat_color() {
        let src = PixelBuffer::filled(10, 10, [40, 80, 120, 255]).unwrap();
        let out = resize(&src, 4, 7).unwrap();
        assert_eq!(out.dimensions(), (4, 7));
        // Bilinear over a flat image never invents new colors.
        for (_, _, px) in out.pixels() {
            assert_eq!(px, [40, 80, 120, 255]);
        }
    }

    #[test]
    fn test_resize_rejects_zero_target() {
        let src = numbered(4, 4);
        assert!(resize(&src, 0, 4).is_err());
    }

    #[test]
    fn test_scale_preserves_aspect() {
        let src = PixelBuffer::filled(200, 100, [1, 2, 3, 255]).unwrap();
        let out = scale(&src, 50, 50).unwrap();
        assert_eq!(out.dimensions(), (50, 25));

        let tall = PixelBuffer::filled(100, 200, [1, 2, 3, 255]).unwrap();
        let out = scale(&tall, 50, 50).unwrap();
        assert_eq!(out.dimensions(), (25, 50));
    }

    #[test]
    fn test_rotate_90_is_exact() {
        let src = numbered(3, 2);
        let out = rotate(&src, 90).unwrap();
        assert_eq!(out.dimensions(), (2, 3));
        // (x, y) -> (y, width - 1 - x)
        assert_eq!(out.get(0, 2).unwrap(), src.get(0, 0).unwrap());
        assert_eq!(out.get(1, 0).unwrap(), src.get(2, 1).unwrap());
    }

    #[test]
    fn test_rotate_360_is_identity() {
        let src = numbered(4, 4);
        let out = rotate(&src, 360).unwrap();
        assert_eq!(src, out);
        let neg = rotate(&src, -360).unwrap();
        assert_eq!(src, neg);
    }

    #[test]
    fn test_rotate_45_expands_canvas() {
        let src = PixelBuffer::filled(10, 10, [255, 0, 0, 255]).unwrap();
        let out = rotate(&src, 45).unwrap();
        assert!(out.width() > 10);
        // Corner of the expanded canvas is outside the rotated square.
        assert_eq!(out.get(0, 0).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_rotate_rejects_out_of_range() {
        let src = numbered(2, 2);
        assert!(rotate(&src, 361).is_err());
        assert!(rotate(&src, -400).is_err());
    }
}
