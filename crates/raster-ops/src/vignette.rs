//! Vignette frame shading.
//!
//! Darkens and fades the image toward the frame edges using a separable
//! sinusoidal weight. For each pixel the luminance weight is
//!
//! ```text
//! l = (sin(pi * x / W) * sin(pi * y / H)) ^ exponent
//! ```
//!
//! RGB is scaled by `l` and the output alpha encodes the same falloff:
//! fully opaque at the center (`l = 1`), fully transparent at the frame
//! (`l = 0`). The source of this effect stores GD's 7-bit alpha
//! `127 * (1 - l)` with 127 = transparent; in 8-bit RGBA that maps to
//! `A = round(255 * l)`.

use crate::{OpsError, OpsResult};
use raster_core::buffer::CHANNELS;
use raster_core::{clamp_channel, PixelBuffer};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::f64::consts::PI;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Default vignette exponent.
///
/// The source package's two variants default to 0.4 and 1 respectively;
/// this implementation settles on 1 (the function-signature default).
pub const DEFAULT_EXPONENT: f64 = 1.0;

/// Applies the vignette shading, producing a new buffer with alpha falloff.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `exponent` is not finite or
/// not positive.
pub fn vignette(src: &PixelBuffer, exponent: f64) -> OpsResult<PixelBuffer> {
    if !exponent.is_finite() || exponent <= 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "vignette exponent must be finite and > 0, got {exponent}"
        )));
    }
    let (width, height) = src.dimensions();
    debug!(width, height, exponent, "vignette");

    let mut out = PixelBuffer::new(width, height)?;
    let row_len = width as usize * CHANNELS;

    let shade_row = |y: usize, row: &mut [u8]| {
        let sin_y = (PI * y as f64 / height as f64).sin();
        for x in 0..width as usize {
            let sin_x = (PI * x as f64 / width as f64).sin();
            let l = (sin_x * sin_y).powf(exponent);
            let px = src.pixel(x as u32, y as u32);
            let o = x * CHANNELS;
            row[o] = clamp_channel(px[0] as f32 * l as f32);
            row[o + 1] = clamp_channel(px[1] as f32 * l as f32);
            row[o + 2] = clamp_channel(px[2] as f32 * l as f32);
            row[o + 3] = clamp_channel(255.0 * l as f32);
        }
    };

    #[cfg(feature = "parallel")]
    out.data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| shade_row(y, row));

    #[cfg(not(feature = "parallel"))]
    out.data_mut()
        .chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| shade_row(y, row));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_edges_go_transparent_black() {
        let src = PixelBuffer::filled(8, 8, [200, 100, 50, 255]).unwrap();
        let out = vignette(&src, 1.0).unwrap();
        // sin(0) = 0 on the top and left frame rows.
        assert_eq!(out.get(0, 0).unwrap(), [0, 0, 0, 0]);
        assert_eq!(out.get(5, 0).unwrap(), [0, 0, 0, 0]);
        assert_eq!(out.get(0, 5).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_center_stays_bright() {
        let src = PixelBuffer::filled(9, 9, [200, 100, 50, 255]).unwrap();
        let out = vignette(&src, 1.0).unwrap();
        // Odd dimensions put a pixel exactly at W/2, H/2 where both sines
        // are close to 1.
        let center = out.get(4, 4).unwrap();
        assert!(center[0] >= 190);
        assert!(center[3] >= 240);
    }

    #[test]
    fn test_higher_exponent_darkens_faster() {
        let src = PixelBuffer::filled(16, 16, [200, 200, 200, 255]).unwrap();
        let soft = vignette(&src, 0.4).unwrap();
        let hard = vignette(&src, 3.0).unwrap();
        let px_soft = soft.get(3, 3).unwrap();
        let px_hard = hard.get(3, 3).unwrap();
        assert!(px_hard[0] < px_soft[0]);
    }

    #[test]
    fn test_invalid_exponent() {
        let src = PixelBuffer::filled(4, 4, [1, 2, 3, 255]).unwrap();
        assert!(vignette(&src, 0.0).is_err());
        assert!(vignette(&src, -1.0).is_err());
        assert!(vignette(&src, f64::NAN).is_err());
    }
}
