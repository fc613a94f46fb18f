//! Indexed-palette nearest-color replacement.
//!
//! Reduces the buffer to an indexed palette of at most 255 colors, finds
//! the entry nearest to a target RGB under Euclidean distance, and rewrites
//! that single entry, so every pixel previously mapped to it changes
//! simultaneously. The reduction is observable: the buffer stays
//! palettized afterwards, with every pixel holding its entry's color.
//!
//! The palette is built by uniform quantization: colors are bucketed by
//! truncating each channel to 5 bits, and the first 255 distinct buckets
//! (in scan order) become entries. Colors arriving after the palette is
//! full are assigned to their nearest existing entry. The observable
//! contract is the same as a GD-style true-color-to-palette pass; the
//! bucketing itself is not a bit-for-bit octree reproduction.

use raster_core::{rgb_distance_sq, PixelBuffer};
use std::collections::HashMap;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Maximum number of palette entries.
const MAX_COLORS: usize = 255;

/// Quantization bucket for a color: channels truncated to 5 bits.
#[inline]
fn bucket(rgb: [u8; 3]) -> [u8; 3] {
    [rgb[0] & 0xF8, rgb[1] & 0xF8, rgb[2] & 0xF8]
}

/// Replaces the palette entry nearest to `target` with `replacement`.
///
/// Every pixel is written back as its palette entry's color, so the whole
/// buffer ends up quantized, not just the replaced population. Alpha is
/// preserved per pixel; only RGB is rewritten.
pub fn replace_color(buf: &mut PixelBuffer, target: [u8; 3], replacement: [u8; 3]) {
    debug!(?target, ?replacement, "replace_color");

    // Pass 1: build the palette and the pixel -> entry mapping.
    let mut palette: Vec<[u8; 3]> = Vec::new();
    let mut index_of: HashMap<[u8; 3], u8> = HashMap::new();
    let mut indices: Vec<u8> = Vec::with_capacity(buf.pixel_count());

    for (_, _, px) in buf.pixels() {
        let key = bucket([px[0], px[1], px[2]]);
        let idx = match index_of.get(&key) {
            Some(&i) => i,
            None if palette.len() < MAX_COLORS => {
                let i = palette.len() as u8;
                palette.push(key);
                index_of.insert(key, i);
                i
            }
            None => {
                // Palette full: park this bucket on its nearest entry.
                let i = nearest_entry(&palette, key);
                index_of.insert(key, i);
                i
            }
        };
        indices.push(idx);
    }

    // Pass 2: palettize. Pixels on the entry nearest the target take the
    // replacement color; everyone else takes their entry's color.
    let victim = nearest_entry(&palette, target);
    let mut cursor = 0;
    buf.map_pixels(|px| {
        let idx = indices[cursor];
        cursor += 1;
        let rgb = if idx == victim {
            replacement
        } else {
            palette[idx as usize]
        };
        [rgb[0], rgb[1], rgb[2], px[3]]
    });
}

/// Returns the index of the palette entry nearest to `rgb` under Euclidean
/// distance (first match wins ties).
fn nearest_entry(palette: &[[u8; 3]], rgb: [u8; 3]) -> u8 {
    debug_assert!(!palette.is_empty());
    let mut best = 0u8;
    let mut best_d = u32::MAX;
    for (i, &entry) in palette.iter().enumerate() {
        let d = rgb_distance_sq(entry, rgb);
        if d < best_d {
            best_d = d;
            best = i as u8;
        }
    }
    best
}
