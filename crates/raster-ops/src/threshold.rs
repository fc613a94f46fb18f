//! Binary black/white threshold conversion.
//!
//! Per pixel, `total = R + G + B`; when `total > ((255 + level) / 2) * 3`
//! the pixel becomes pure white, otherwise pure black. Alpha is unchanged.
//! Raising `level` raises the bar for white, so positive levels darken the
//! result and negative levels lighten it.

use raster_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Converts the buffer to two-color black and white in place.
pub fn black_white(buf: &mut PixelBuffer, level: i32) {
    debug!(level, "black_white");
    let bar = (255.0 + level as f64) / 2.0 * 3.0;
    buf.map_pixels(|px| {
        let total = (px[0] as u32 + px[1] as u32 + px[2] as u32) as f64;
        let v = if total > bar { 255 } else { 0 };
        [v, v, v, px[3]]
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_two_colored() {
        let mut buf = PixelBuffer::new(8, 8).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let v = (x * 36) as u8;
                buf.put_pixel(x, y, [v, v.wrapping_add(13), 200, 128]);
            }
        }
        black_white(&mut buf, 20);
        for (_, _, px) in buf.pixels() {
            assert!(px[0] == 0 || px[0] == 255);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[0], px[2]);
            assert_eq!(px[3], 128); // alpha untouched
        }
    }

    #[test]
    fn test_threshold_boundary() {
        // level 0: bar = 382.5; total 382 stays black, 383 goes white.
        let mut dark = PixelBuffer::filled(1, 1, [127, 127, 128, 255]).unwrap();
        black_white(&mut dark, 0);
        assert_eq!(dark.get(0, 0).unwrap(), [0, 0, 0, 255]);

        let mut bright = PixelBuffer::filled(1, 1, [128, 128, 127, 255]).unwrap();
        black_white(&mut bright, 0);
        assert_eq!(bright.get(0, 0).unwrap(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_positive_level_darkens() {
        // total 400 clears the level-0 bar but not the level-50 bar (457.5).
        let mut buf = PixelBuffer::filled(1, 1, [134, 133, 133, 255]).unwrap();
        black_white(&mut buf, 50);
        assert_eq!(buf.get(0, 0).unwrap()[0], 0);
    }
}
