//! Pixel type and channel arithmetic helpers.
//!
//! All pixel data in raster-rs is 8-bit-per-channel interleaved RGBA.
//! Channel arithmetic inside effects is done in wider types (`i32`/`f32`)
//! and saturated back to `[0, 255]` with [`clamp_channel`] before storage,
//! matching native image-library clamping behavior.

/// A single RGBA sample: `[R, G, B, A]`, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Alpha value for a fully opaque pixel.
pub const ALPHA_OPAQUE: u8 = 255;

/// Alpha value for a fully transparent pixel.
pub const ALPHA_TRANSPARENT: u8 = 0;

/// Saturates a wide channel value to the representable range `[0, 255]`.
///
/// # Example
///
/// ```rust
/// use raster_core::clamp_channel;
///
/// assert_eq!(clamp_channel(300.0), 255);
/// assert_eq!(clamp_channel(-17.0), 0);
/// assert_eq!(clamp_channel(128.4), 128);
/// ```
#[inline]
pub fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Saturating add of a signed delta to a channel value.
#[inline]
pub fn saturating_add(channel: u8, delta: i32) -> u8 {
    (channel as i32 + delta).clamp(0, 255) as u8
}

/// Unweighted grayscale average `(R + G + B) / 3` of a pixel.
///
/// This is the gray used by desaturate blending in `raster-ops`. An
/// unweighted average is deliberately chosen over a perceptual (Rec.709)
/// weighting: it matches the behavior of GD-style gray merging, and it makes
/// a solid `(255, 0, 0)` red desaturate to `(85, 85, 85)`.
#[inline]
pub fn gray_average(px: Rgba) -> u8 {
    ((px[0] as u32 + px[1] as u32 + px[2] as u32) / 3) as u8
}

/// Squared Euclidean distance between two RGB triples.
///
/// Used for nearest-palette-entry lookup; squared form avoids the sqrt since
/// only the ordering matters.
#[inline]
pub fn rgb_distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    let dr = a[0] as i32 - b[0] as i32;
    let dg = a[1] as i32 - b[1] as i32;
    let db = a[2] as i32 - b[2] as i32;
    (dr * dr + dg * dg + db * db) as u32
}
