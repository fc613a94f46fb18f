//! Fisheye lens remapping.
//!
//! Projects the source onto a square canvas of side `D = 2 * min(W, H) / pi`
//! using an arcsine radial remap. Output pixels inside the lens circle
//! sample the source at
//!
//! ```text
//! arc    = oc * asin(r / oc)
//! factor = arc / r
//! src    = (dx * factor + cx, dy * factor + cy)
//! ```
//!
//! where `oc = D / 2` is the output center and `(cx, cy)` the source center.
//! Pixels outside the circle stay transparent. The exact center (`r = 0`)
//! would make `factor` a 0/0; it is special-cased to sample the source
//! center directly (the `factor -> 1` limit).

use crate::OpsResult;
use raster_core::PixelBuffer;
use std::f64::consts::PI;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Applies the fisheye remap, producing a square output buffer.
///
/// The output side is `round(2 * min(W, H) / pi)`, which is at least 1 for
/// any valid source, so the remap itself cannot fail; the `Result` carries
/// only allocation-level errors.
pub fn fisheye(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    let (width, height) = src.dimensions();
    let side = (2.0 * width.min(height) as f64 / PI).round() as u32;
    debug!(width, height, side, "fisheye");

    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let oc = side as f64 / 2.0;

    let mut out = PixelBuffer::new(side, side)?;
    for y in 0..side {
        for x in 0..side {
            let dx = x as f64 - oc;
            let dy = y as f64 - oc;
            let r = dx.hypot(dy);
            if r > oc {
                continue; // outside the lens, stays transparent
            }
            let (sx, sy) = if r == 0.0 {
                (cx, cy)
            } else {
                let factor = oc * (r / oc).asin() / r;
                (dx * factor + cx, dy * factor + cy)
            };
            let px = src.get_clamped(sx.round() as i64, sy.round() as i64);
            out.put_pixel(x, y, px);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_square_source_output_side() {
        let src = PixelBuffer::filled(100, 100, [10, 20, 30, 255]).unwrap();
        let out = fisheye(&src).unwrap();
        let expected = (2.0 * 100.0 / PI).round() as i64;
        assert_eq!(out.width(), out.height());
        assert!((out.width() as i64 - expected).abs() <= 1);
    }

    #[test]
    fn test_center_pixel_maps_to_source_center() {
        let mut src = PixelBuffer::new(100, 100).unwrap();
        src.set(50, 50, [255, 0, 255, 255]).unwrap();
        let out = fisheye(&src).unwrap();
        let oc = out.width() / 2;
        assert_eq!(out.get(oc, oc).unwrap(), [255, 0, 255, 255]);
    }

    #[test]
    fn test_corners_stay_transparent() {
        let src = PixelBuffer::filled(80, 60, [200, 200, 200, 255]).unwrap();
        let out = fisheye(&src).unwrap();
        let last = out.width() - 1;
        assert_eq!(out.get(0, 0).unwrap(), [0, 0, 0, 0]);
        assert_eq!(out.get(last, 0).unwrap(), [0, 0, 0, 0]);
        assert_eq!(out.get(0, last).unwrap(), [0, 0, 0, 0]);
        assert_eq!(out.get(last, last).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_uses_smaller_dimension() {
        let src = PixelBuffer::filled(200, 50, [1, 1, 1, 255]).unwrap();
        let out = fisheye(&src).unwrap();
        let expected = (2.0 * 50.0 / PI).round() as u32;
        assert_eq!(out.width(), expected);
    }

    #[test]
    fn test_tiny_source_still_produces_a_canvas() {
        let src = PixelBuffer::filled(1, 1, [9, 9, 9, 255]).unwrap();
        let out = fisheye(&src).unwrap();
        assert_eq!(out.dimensions(), (1, 1));
    }
}
