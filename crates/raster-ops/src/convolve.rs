//! Generic 3x3 convolution and the named kernels built on it.
//!
//! # Kernels
//!
//! - [`Kernel3::identity`] - Pass-through (used to verify the round-trip law)
//! - [`Kernel3::sharpen`] - Unsharp center-weighted kernel
//! - [`Kernel3::gaussian`] - 3x3 Gaussian blur
//! - [`Kernel3::smooth`] - Center-weighted smoothing
//! - [`Kernel3::emboss`] - Diagonal relief
//! - [`Kernel3::mean_removal`] - Sketch-style mean removal
//!
//! # Border handling
//!
//! Border pixels sample edge-clamped coordinates: the nearest in-bounds
//! pixel is replicated, so the identity kernel is a true identity
//! everywhere including corners.
//!
//! # Example
//!
//! ```rust
//! use raster_core::PixelBuffer;
//! use raster_ops::convolve::{convolve3, Kernel3};
//!
//! let src = PixelBuffer::filled(8, 8, [100, 100, 100, 255]).unwrap();
//! let out = convolve3(&src, &Kernel3::gaussian()).unwrap();
//! assert_eq!(out.dimensions(), (8, 8));
//! ```

use crate::{OpsError, OpsResult};
use raster_core::buffer::CHANNELS;
use raster_core::{clamp_channel, PixelBuffer};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// A 3x3 convolution kernel with divisor and offset.
///
/// The output value per channel is
/// `clamp(offset + sum(kernel[i][j] * in[x+j-1, y+i-1]) / divisor)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3 {
    /// Kernel weights, row-major: `weights[row][col]`.
    pub weights: [[f32; 3]; 3],
    /// Divisor applied to the weighted sum.
    pub divisor: f32,
    /// Offset added after division.
    pub offset: f32,
}

impl Kernel3 {
    /// Creates a kernel from weights, divisor, and offset.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] if the divisor is zero.
    pub fn new(weights: [[f32; 3]; 3], divisor: f32, offset: f32) -> OpsResult<Self> {
        if divisor == 0.0 {
            return Err(OpsError::InvalidParameter(
                "convolution divisor must be non-zero".into(),
            ));
        }
        Ok(Self {
            weights,
            divisor,
            offset,
        })
    }

    /// The identity kernel: divisor 1, offset 0, center weight 1.
    pub const fn identity() -> Self {
        Self {
            weights: [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
            divisor: 1.0,
            offset: 0.0,
        }
    }

    /// The sharpen kernel `[[0,-1,0],[-1,5,-1],[0,-1,0]]`, divisor 1,
    /// offset 127.
    pub const fn sharpen() -> Self {
        Self {
            weights: [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]],
            divisor: 1.0,
            offset: 127.0,
        }
    }

    /// 3x3 Gaussian blur kernel (1-2-1 binomial, divisor 16).
    pub const fn gaussian() -> Self {
        Self {
            weights: [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]],
            divisor: 16.0,
            offset: 0.0,
        }
    }

    /// Center-weighted smoothing kernel; `level` is the center weight and
    /// the divisor is `level + 8`.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] if `level` makes the divisor
    /// zero (`level == -8`).
    pub fn smooth(level: f32) -> OpsResult<Self> {
        Self::new(
            [[1.0, 1.0, 1.0], [1.0, level, 1.0], [1.0, 1.0, 1.0]],
            level + 8.0,
            0.0,
        )
    }

    /// Emboss kernel (diagonal relief), offset 127.
    pub const fn emboss() -> Self {
        Self {
            weights: [[1.5, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, -1.5]],
            divisor: 1.0,
            offset: 127.0,
        }
    }

    /// Mean-removal kernel (sketch effect).
    pub const fn mean_removal() -> Self {
        Self {
            weights: [[-1.0, -1.0, -1.0], [-1.0, 9.0, -1.0], [-1.0, -1.0, -1.0]],
            divisor: 1.0,
            offset: 0.0,
        }
    }
}

/// Convolves the RGB channels of a buffer with a 3x3 kernel.
///
/// Alpha is passed through unchanged from the source pixel. Border pixels
/// replicate the nearest in-bounds neighbor.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if the kernel divisor is zero.
pub fn convolve3(src: &PixelBuffer, kernel: &Kernel3) -> OpsResult<PixelBuffer> {
    if kernel.divisor == 0.0 {
        return Err(OpsError::InvalidParameter(
            "convolution divisor must be non-zero".into(),
        ));
    }
    let (width, height) = src.dimensions();
    trace!(width, height, "convolve3");

    let mut out = PixelBuffer::new(width, height)?;
    let row_len = width as usize * CHANNELS;

    let convolve_row = |y: usize, row: &mut [u8]| {
        let yy = y as i64;
        for x in 0..width as usize {
            let xx = x as i64;
            let mut acc = [0.0f32; 3];
            for (ky, krow) in kernel.weights.iter().enumerate() {
                for (kx, &w) in krow.iter().enumerate() {
                    if w == 0.0 {
                        continue;
                    }
                    let px = src.get_clamped(xx + kx as i64 - 1, yy + ky as i64 - 1);
                    acc[0] += w * px[0] as f32;
                    acc[1] += w * px[1] as f32;
                    acc[2] += w * px[2] as f32;
                }
            }
            let center = src.pixel(x as u32, y as u32);
            let o = x * CHANNELS;
            row[o] = clamp_channel(acc[0] / kernel.divisor + kernel.offset);
            row[o + 1] = clamp_channel(acc[1] / kernel.divisor + kernel.offset);
            row[o + 2] = clamp_channel(acc[2] / kernel.divisor + kernel.offset);
            row[o + 3] = center[3];
        }
    };

    #[cfg(feature = "parallel")]
    out.data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| convolve_row(y, row));

    #[cfg(not(feature = "parallel"))]
    out.data_mut()
        .chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| convolve_row(y, row));

    Ok(out)
}

/// Applies the sharpen kernel for the given number of passes.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `passes` is zero.
pub fn sharpen(src: &PixelBuffer, passes: u32) -> OpsResult<PixelBuffer> {
    if passes == 0 {
        return Err(OpsError::InvalidParameter(
            "sharpen passes must be >= 1".into(),
        ));
    }
    debug!(passes, "sharpen");
    let kernel = Kernel3::sharpen();
    let mut out = convolve3(src, &kernel)?;
    for _ in 1..passes {
        out = convolve3(&out, &kernel)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let v = ((x * 17 + y * 31) % 256) as u8;
                buf.put_pixel(x, y, [v, v.wrapping_add(40), v.wrapping_add(80), 255]);
            }
        }
        buf
    }

    #[test]
    fn test_identity_kernel_is_exact_identity() {
        let src = gradient(9, 7);
        let out = convolve3(&src, &Kernel3::identity()).unwrap();
        // Includes all borders and corners: edge clamping must not disturb
        // the identity kernel.
        assert_eq!(src, out);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let src = gradient(4, 4);
        let k = Kernel3 {
            weights: [[0.0; 3]; 3],
            divisor: 0.0,
            offset: 0.0,
        };
        assert!(convolve3(&src, &k).is_err());
        assert!(Kernel3::new([[0.0; 3]; 3], 0.0, 0.0).is_err());
        assert!(Kernel3::smooth(-8.0).is_err());
    }

    #[test]
    fn test_blur_kernels_have_unit_gain() {
        // Weight sum / divisor = 1, so flat regions are fixed points.
        let sum = |k: &Kernel3| k.weights.iter().flatten().sum::<f32>();
        let g = Kernel3::gaussian();
        assert_relative_eq!(sum(&g), g.divisor);
        let s = Kernel3::smooth(6.0).unwrap();
        assert_relative_eq!(sum(&s), s.divisor);
        let s = Kernel3::smooth(-2.5).unwrap();
        assert_relative_eq!(sum(&s), s.divisor);
    }

    #[test]
    fn test_gaussian_preserves_flat_regions() {
        let src = PixelBuffer::filled(8, 8, [120, 60, 30, 255]).unwrap();
        let out = convolve3(&src, &Kernel3::gaussian()).unwrap();
        // A flat image is a fixed point of any normalized blur.
        for (_, _, px) in out.pixels() {
            assert_eq!(px, [120, 60, 30, 255]);
        }
    }

    #[test]
    fn test_offset_shifts_output() {
        let src = PixelBuffer::filled(4, 4, [10, 10, 10, 255]).unwrap();
        let k = Kernel3 {
            weights: [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
            divisor: 1.0,
            offset: 100.0,
        };
        let out = convolve3(&src, &k).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), [110, 110, 110, 255]);
    }

    #[test]
    fn test_alpha_passes_through() {
        let mut src = PixelBuffer::filled(4, 4, [50, 50, 50, 255]).unwrap();
        src.set(1, 1, [50, 50, 50, 7]).unwrap();
        let out = convolve3(&src, &Kernel3::gaussian()).unwrap();
        assert_eq!(out.get(1, 1).unwrap()[3], 7);
        assert_eq!(out.get(0, 0).unwrap()[3], 255);
    }

    #[test]
    fn test_sharpen_requires_passes() {
        let src = gradient(4, 4);
        assert!(sharpen(&src, 0).is_err());
        assert!(sharpen(&src, 2).is_ok());
    }

    #[test]
    fn test_output_clamped() {
        let src = PixelBuffer::filled(4, 4, [250, 250, 250, 255]).unwrap();
        let out = convolve3(&src, &Kernel3::sharpen()).unwrap();
        // 250 * (5 - 4) + 127 = 377, clamps to 255.
        assert_eq!(out.get(2, 2).unwrap(), [255, 255, 255, 255]);
    }
}
