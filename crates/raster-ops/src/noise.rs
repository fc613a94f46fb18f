//! Uniform random noise injection.
//!
//! For each pixel one uniform random integer `j` in `[-level, level]` is
//! drawn and added to R, G, and B (the same `j` for all three channels of a
//! pixel, redrawn per pixel), then clamped to `[0, 255]`. Alpha is never
//! touched.
//!
//! Noise does not need to be cryptographically secure; [`SmallRng`] is used
//! for speed. Seeding is an implementation choice, so a seeded entry point
//! is provided for deterministic tests.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use raster_core::{saturating_add, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Adds uniform noise at the given level, seeded from system entropy.
///
/// `noise(buf, 0)` is a guaranteed no-op.
pub fn noise(buf: &mut PixelBuffer, level: u8) {
    let mut rng = SmallRng::from_entropy();
    noise_with_rng(buf, level, &mut rng);
}

/// Adds uniform noise using a caller-provided seed.
///
/// Identical buffers, levels, and seeds produce identical output.
pub fn noise_seeded(buf: &mut PixelBuffer, level: u8, seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    noise_with_rng(buf, level, &mut rng);
}

fn noise_with_rng(buf: &mut PixelBuffer, level: u8, rng: &mut SmallRng) {
    if level == 0 {
        return;
    }
    debug!(level, "noise");
    let level = level as i32;
    buf.map_pixels(|px| {
        let j = rng_draw(rng, level);
        [
            saturating_add(px[0], j),
            saturating_add(px[1], j),
            saturating_add(px[2], j),
            px[3],
        ]
    });
}

#[inline]
fn rng_draw(rng: &mut SmallRng, level: i32) -> i32 {
    rng.gen_range(-level..=level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_zero_is_noop() {
        let src = PixelBuffer::filled(8, 8, [100, 150, 200, 255]).unwrap();
        let mut buf = src.clone();
        noise(&mut buf, 0);
        assert_eq!(src, buf);
    }

    #[test]
    fn test_noise_stays_in_range() {
        let mut buf = PixelBuffer::filled(16, 16, [128, 128, 128, 255]).unwrap();
        noise_seeded(&mut buf, 30, 42);
        for (_, _, px) in buf.pixels() {
            assert!(px[0] >= 98 && px[0] <= 158);
            // Same draw applied to all three channels.
            assert_eq!(px[0] as i32 - 128, px[1] as i32 - 128);
            assert_eq!(px[0] as i32 - 128, px[2] as i32 - 128);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_noise_seeded_is_deterministic() {
        let mut a = PixelBuffer::filled(8, 8, [90, 90, 90, 255]).unwrap();
        let mut b = PixelBuffer::filled(8, 8, [90, 90, 90, 255]).unwrap();
        noise_seeded(&mut a, 25, 7);
        noise_seeded(&mut b, 25, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_clamps_at_extremes() {
        let mut buf = PixelBuffer::filled(8, 8, [255, 0, 255, 255]).unwrap();
        noise_seeded(&mut buf, 50, 3);
        for (_, _, px) in buf.pixels() {
            // White channel can only move down, black only up, and both by
            // the same draw.
            assert_eq!(px[0], px[2]);
            assert!(px[1] <= 50);
        }
    }
}
