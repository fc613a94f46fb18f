//! Partial desaturation.
//!
//! Blends each pixel with its own grayscale value:
//!
//! ```text
//! out = original * (1 - level/100) + gray * (level/100)
//! ```
//!
//! where `gray` is the **unweighted** average `(R + G + B) / 3` (see
//! [`raster_core::gray_average`] for why). `level = 0` leaves the image
//! unchanged; `level = 100` yields full grayscale.

use crate::{OpsError, OpsResult};
use raster_core::{clamp_channel, gray_average, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Desaturates the buffer in place by `level` percent.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `level > 100`.
pub fn desaturate(buf: &mut PixelBuffer, level: u8) -> OpsResult<()> {
    if level > 100 {
        return Err(OpsError::InvalidParameter(format!(
            "desaturate level must be 0..=100, got {level}"
        )));
    }
    if level == 0 {
        return Ok(());
    }
    debug!(level, "desaturate");
    let t = level as f32 / 100.0;
    buf.map_pixels(|px| {
        let gray = gray_average(px) as f32;
        [
            clamp_channel(px[0] as f32 * (1.0 - t) + gray * t),
            clamp_channel(px[1] as f32 * (1.0 - t) + gray * t),
            clamp_channel(px[2] as f32 * (1.0 - t) + gray * t),
            px[3],
        ]
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_desaturate_of_red() {
        // 4x4 opaque red: gray = (255+0+0)/3 = 85 on every channel.
        let mut buf = PixelBuffer::filled(4, 4, [255, 0, 0, 255]).unwrap();
        desaturate(&mut buf, 100).unwrap();
        for (_, _, px) in buf.pixels() {
            assert_eq!(px, [85, 85, 85, 255]);
        }
    }

    #[test]
    fn test_zero_level_is_noop() {
        let src = PixelBuffer::filled(4, 4, [12, 200, 77, 255]).unwrap();
        let mut buf = src.clone();
        desaturate(&mut buf, 0).unwrap();
        assert_eq!(src, buf);
    }

    #[test]
    fn test_half_level_blends_halfway() {
        let mut buf = PixelBuffer::filled(1, 1, [255, 0, 0, 255]).unwrap();
        desaturate(&mut buf, 50).unwrap();
        // 255*0.5 + 85*0.5 = 170; 0*0.5 + 85*0.5 = 42.5 -> 43
        assert_eq!(buf.get(0, 0).unwrap(), [170, 43, 43, 255]);
    }

    #[test]
    fn test_level_out_of_range() {
        let mut buf = PixelBuffer::filled(1, 1, [0, 0, 0, 255]).unwrap();
        assert!(desaturate(&mut buf, 101).is_err());
    }
}
