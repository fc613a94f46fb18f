//! Tonal and color adjustments.
//!
//! These are the straightforward per-pixel filters the pipeline chains
//! around the heavier effects: grayscale, brightness, contrast, colorize,
//! negative, sepia, pixelate, plus the convolution-backed smooth, blur,
//! emboss, and sketch wrappers.
//!
//! Level parameters follow the documented ranges (`[-100, 100]` for
//! brightness and contrast); values outside are a typed
//! [`OpsError::InvalidParameter`], never a process abort.

use crate::convolve::{convolve3, Kernel3};
use crate::{OpsError, OpsResult};
use raster_core::{clamp_channel, saturating_add, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Converts the buffer to luminance-weighted grayscale in place.
///
/// Uses the classic 0.299/0.587/0.114 weights (this is the "single library
/// call" grayscale; the partial [`crate::desaturate`] blend deliberately
/// uses an unweighted average instead).
pub fn greyscale(buf: &mut PixelBuffer) {
    trace!("greyscale");
    buf.map_pixels(|px| {
        let l = clamp_channel(0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32);
        [l, l, l, px[3]]
    });
}

/// Adjusts brightness in place; `level` in `[-100, 100]` maps linearly to a
/// channel delta of `[-255, 255]`.
pub fn brightness(buf: &mut PixelBuffer, level: i32) -> OpsResult<()> {
    check_level(level, "brightness")?;
    trace!(level, "brightness");
    let delta = (level as f32 * 2.55).round() as i32;
    buf.map_pixels(|px| {
        [
            saturating_add(px[0], delta),
            saturating_add(px[1], delta),
            saturating_add(px[2], delta),
            px[3],
        ]
    });
    Ok(())
}

/// Adjusts contrast in place; `level` in `[-100, 100]`, negative values
/// increase contrast (GD convention).
pub fn contrast(buf: &mut PixelBuffer, level: i32) -> OpsResult<()> {
    check_level(level, "contrast")?;
    trace!(level, "contrast");
    let c = (100.0 - level as f32) / 100.0;
    let c = c * c;
    buf.map_pixels(|px| {
        let adjust = |v: u8| clamp_channel(((v as f32 / 255.0 - 0.5) * c + 0.5) * 255.0);
        [adjust(px[0]), adjust(px[1]), adjust(px[2]), px[3]]
    });
    Ok(())
}

/// Shifts each channel by a signed delta in `[-255, 255]`, in place.
pub fn colorize(buf: &mut PixelBuffer, r: i32, g: i32, b: i32) -> OpsResult<()> {
    for (name, v) in [("r", r), ("g", g), ("b", b)] {
        if !(-255..=255).contains(&v) {
            return Err(OpsError::InvalidParameter(format!(
                "colorize {name} must be -255..=255, got {v}"
            )));
        }
    }
    trace!(r, g, b, "colorize");
    buf.map_pixels(|px| {
        [
            saturating_add(px[0], r),
            saturating_add(px[1], g),
            saturating_add(px[2], b),
            px[3],
        ]
    });
    Ok(())
}

/// Inverts RGB channels in place, leaving alpha untouched.
pub fn negative(buf: &mut PixelBuffer) {
    trace!("negative");
    buf.map_pixels(|px| [255 - px[0], 255 - px[1], 255 - px[2], px[3]]);
}

/// Applies a sepia tone in place: grayscale, darken by 30, then a warm
/// colorize of (90, 55, 30).
pub fn sepia(buf: &mut PixelBuffer) -> OpsResult<()> {
    debug!("sepia");
    greyscale(buf);
    brightness(buf, -30)?;
    colorize(buf, 90, 55, 30)
}

/// Pixelates in place using `size x size` block averages.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `size` is zero.
pub fn pixelate(buf: &mut PixelBuffer, size: u32) -> OpsResult<()> {
    if size == 0 {
        return Err(OpsError::InvalidParameter(
            "pixelate block size must be >= 1".into(),
        ));
    }
    if size == 1 {
        return Ok(());
    }
    debug!(size, "pixelate");
    let (width, height) = buf.dimensions();
    for by in (0..height).step_by(size as usize) {
        for bx in (0..width).step_by(size as usize) {
            let bw = size.min(width - bx);
            let bh = size.min(height - by);
            let mut acc = [0u64; 4];
            for y in by..by + bh {
                for x in bx..bx + bw {
                    let px = buf.pixel(x, y);
                    for (a, v) in acc.iter_mut().zip(px) {
                        *a += v as u64;
                    }
                }
            }
            let n = (bw * bh) as u64;
            let avg = [
                (acc[0] / n) as u8,
                (acc[1] / n) as u8,
                (acc[2] / n) as u8,
                (acc[3] / n) as u8,
            ];
            for y in by..by + bh {
                for x in bx..bx + bw {
                    buf.put_pixel(x, y, avg);
                }
            }
        }
    }
    Ok(())
}

/// Smoothing filter: center-weighted 3x3 convolution where `level` is the
/// center weight.
pub fn smooth(buf: &PixelBuffer, level: f32) -> OpsResult<PixelBuffer> {
    convolve3(buf, &Kernel3::smooth(level)?)
}

/// Gaussian blur, `passes` applications of the 3x3 binomial kernel.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `passes` is zero.
pub fn blur(buf: &PixelBuffer, passes: u32) -> OpsResult<PixelBuffer> {
    if passes == 0 {
        return Err(OpsError::InvalidParameter("blur passes must be >= 1".into()));
    }
    debug!(passes, "blur");
    let kernel = Kernel3::gaussian();
    let mut out = convolve3(buf, &kernel)?;
    for _ in 1..passes {
        out = convolve3(&out, &kernel)?;
    }
    Ok(out)
}

/// Emboss relief filter.
pub fn emboss(buf: &PixelBuffer) -> OpsResult<PixelBuffer> {
    convolve3(buf, &Kernel3::emboss())
}

/// Sketch (mean-removal) filter.
pub fn sketch(buf: &PixelBuffer) -> OpsResult<PixelBuffer> {
    convolve3(buf, &Kernel3::mean_removal())
}

fn check_level(level: i32, what: &str) -> OpsResult<()> {
    if !(-100..=100).contains(&level) {
        return Err(OpsError::InvalidParameter(format!(
            "{what} level must be -100..=100, got {level}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greyscale_flattens_channels() {
        let mut buf = PixelBuffer::filled(4, 4, [200, 100, 50, 255]).unwrap();
        greyscale(&mut buf);
        let px = buf.get(0, 0).unwrap();
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        // 0.299*200 + 0.587*100 + 0.114*50 = 124.2
        assert_eq!(px[0], 124);
    }

    #[test]
    fn test_brightness_range_and_clamp() {
        let mut buf = PixelBuffer::filled(2, 2, [200, 10, 128, 255]).unwrap();
        assert!(brightness(&mut buf, 101).is_err());
        assert!(brightness(&mut buf, -101).is_err());
        brightness(&mut buf, 100).unwrap();
        assert_eq!(buf.get(0, 0).unwrap(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_contrast_pushes_towards_extremes() {
        let mut buf = PixelBuffer::filled(1, 1, [200, 60, 128, 255]).unwrap();
        contrast(&mut buf, -50).unwrap();
        let px = buf.get(0, 0).unwrap();
        assert!(px[0] > 200);
        assert!(px[1] < 60);
    }

    #[test]
    fn test_contrast_zeroing_level_flattens() {
        let mut buf = PixelBuffer::filled(1, 1, [10, 250, 128, 255]).unwrap();
        contrast(&mut buf, 100).unwrap();
        // c = 0: everything collapses to mid-gray.
        assert_eq!(buf.get(0, 0).unwrap(), [128, 128, 128, 255]);
    }

    #[test]
    fn test_negative_inverts() {
        let mut buf = PixelBuffer::filled(1, 1, [0, 255, 100, 42]).unwrap();
        negative(&mut buf);
        assert_eq!(buf.get(0, 0).unwrap(), [255, 0, 155, 42]);
    }

    #[test]
    fn test_colorize_shifts_and_clamps() {
        let mut buf = PixelBuffer::filled(1, 1, [100, 250, 50, 255]).unwrap();
        colorize(&mut buf, 50, 50, -100).unwrap();
        assert_eq!(buf.get(0, 0).unwrap(), [150, 255, 0, 255]);
        assert!(colorize(&mut buf, 300, 0, 0).is_err());
    }

    #[test]
    fn test_pixelate_averages_blocks() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        // Left 2x2 block: two black and two white pixels -> average 127.
        buf.set(0, 0, [255, 255, 255, 255]).unwrap();
        buf.set(1, 1, [255, 255, 255, 255]).unwrap();
        buf.set(0, 1, [0, 0, 0, 255]).unwrap();
        buf.set(1, 0, [0, 0, 0, 255]).unwrap();
        pixelate(&mut buf, 2).unwrap();
        assert_eq!(buf.get(0, 0).unwrap(), buf.get(1, 1).unwrap());
        assert_eq!(buf.get(0, 0).unwrap()[0], 127);
    }

    #[test]
    fn test_pixelate_size_one_is_noop() {
        let src = PixelBuffer::filled(3, 3, [10, 20, 30, 255]).unwrap();
        let mut buf = src.clone();
        pixelate(&mut buf, 1).unwrap();
        assert_eq!(src, buf);
        assert!(pixelate(&mut buf, 0).is_err());
    }

    #[test]
    fn test_sepia_is_warm() {
        let mut buf = PixelBuffer::filled(2, 2, [128, 128, 128, 255]).unwrap();
        sepia(&mut buf).unwrap();
        let px = buf.get(0, 0).unwrap();
        assert!(px[0] > px[1]);
        assert!(px[1] > px[2]);
    }

    #[test]
    fn test_blur_needs_passes() {
        let buf = PixelBuffer::filled(4, 4, [50, 50, 50, 255]).unwrap();
        assert!(blur(&buf, 0).is_err());
        assert!(blur(&buf, 2).is_ok());
    }
}
