//! Anaglyph-style duplicate compositing.
//!
//! Builds a cyan-tinted duplicate of the image (a colorize pass saturating
//! the green and blue channels while leaving red alone), blends it at 50%
//! opacity shifted 30 pixels to the right over the fully opaque original,
//! then crops the composite to `[30, 0, W-30, H]` to discard the exposed
//! strip on the left. The output is therefore 30 pixels narrower than the
//! input and the same height.

use crate::composite::blend_pixel;
use crate::transform::crop;
use crate::{adjust, OpsError, OpsResult};
use raster_core::{PixelBuffer, Rect};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Horizontal shift of the duplicate, in pixels.
const SHIFT: u32 = 30;

/// Applies the anaglyph duplication effect.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if the source is not wider than
/// the 30-pixel shift.
pub fn anaglyph(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    let (width, height) = src.dimensions();
    if width <= SHIFT {
        return Err(OpsError::InvalidParameter(format!(
            "anaglyph needs width > {SHIFT}, got {width}"
        )));
    }
    debug!(width, height, "anaglyph");

    let mut cyan = src.clone();
    adjust::colorize(&mut cyan, 0, 255, 255)?;

    let mut composite = src.clone();
    for y in 0..height {
        for x in 0..width - SHIFT {
            let bx = x + SHIFT;
            let mixed = blend_pixel(composite.pixel(bx, y), cyan.pixel(x, y), 0.5);
            composite.put_pixel(bx, y, mixed);
        }
    }

    crop(&composite, Rect::new(SHIFT, 0, width - SHIFT, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dimensions() {
        let src = PixelBuffer::filled(100, 40, [120, 60, 30, 255]).unwrap();
        let out = anaglyph(&src).unwrap();
        assert_eq!(out.width(), 70);
        assert_eq!(out.height(), 40);
    }

    #[test]
    fn test_duplicate_is_cyan_tinted() {
        let src = PixelBuffer::filled(64, 8, [100, 0, 0, 255]).unwrap();
        let out = anaglyph(&src).unwrap();
        // Blend of original (100,0,0) with cyan duplicate (100,255,255)
        // at 50%: green and blue rise, red stays.
        let px = out.get(10, 4).unwrap();
        assert_eq!(px[0], 100);
        assert!(px[1] > 100);
        assert!(px[2] > 100);
    }

    #[test]
    fn test_narrow_source_rejected() {
        let src = PixelBuffer::filled(30, 10, [0, 0, 0, 255]).unwrap();
        assert!(anaglyph(&src).is_err());
        let src = PixelBuffer::filled(31, 10, [0, 0, 0, 255]).unwrap();
        assert!(anaglyph(&src).is_ok());
    }
}
