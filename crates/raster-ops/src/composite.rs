//! Overlay and layer compositing.
//!
//! Two compositing surfaces:
//!
//! - [`overlay`] - Places a (typically smaller) image at a named position
//!   within the base and blends only the covered sub-rectangle.
//! - [`layer`] - Full-canvas merge: a transparent canvas receives the
//!   overlay at 100%, then the base is merged over it at the given opacity.
//!
//! The blend is a straight linear mix per RGB channel,
//! `out = base * (1 - p) + over * p` with `p = opacity / 100`. The
//! destination's alpha is kept (GD merge semantics): blending never
//! punches holes into an opaque base.

use crate::{OpsError, OpsResult};
use raster_core::{clamp_channel, PixelBuffer, Rect, Rgba};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Placement of an overlay within a base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Centered on both axes.
    #[default]
    Center,
    /// Flush with the top-left corner.
    TopLeft,
    /// Flush with the top-right corner.
    TopRight,
    /// Flush with the bottom-left corner.
    BottomLeft,
    /// Flush with the bottom-right corner.
    BottomRight,
}

impl Position {
    /// Parses a position name (`center`, `top-left`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "center" | "" => Some(Self::Center),
            "top-left" => Some(Self::TopLeft),
            "top-right" => Some(Self::TopRight),
            "bottom-left" => Some(Self::BottomLeft),
            "bottom-right" => Some(Self::BottomRight),
            _ => None,
        }
    }

    /// Computes the top-left placement coordinate of an `ow x oh` overlay
    /// within a `bw x bh` base. Coordinates may be negative when the
    /// overlay is larger than the base (callers clip).
    pub fn anchor(&self, bw: u32, bh: u32, ow: u32, oh: u32) -> (i64, i64) {
        let (bw, bh, ow, oh) = (bw as i64, bh as i64, ow as i64, oh as i64);
        match self {
            Self::Center => ((bw - ow) / 2, (bh - oh) / 2),
            Self::TopLeft => (0, 0),
            Self::TopRight => (bw - ow, 0),
            Self::BottomLeft => (0, bh - oh),
            Self::BottomRight => (bw - ow, bh - oh),
        }
    }
}

/// Linearly mixes the RGB channels of `over` into `base` at `p` in `[0, 1]`,
/// keeping the base alpha.
#[inline]
pub fn blend_pixel(base: Rgba, over: Rgba, p: f32) -> Rgba {
    [
        clamp_channel(base[0] as f32 * (1.0 - p) + over[0] as f32 * p),
        clamp_channel(base[1] as f32 * (1.0 - p) + over[1] as f32 * p),
        clamp_channel(base[2] as f32 * (1.0 - p) + over[2] as f32 * p),
        base[3],
    ]
}

/// Blends `over` into `base` at the given position and opacity percent.
///
/// Pixels outside the overlay's footprint are untouched; an overlay larger
/// than the base is clipped to the base bounds.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `opacity > 100`.
pub fn overlay(
    base: &mut PixelBuffer,
    over: &PixelBuffer,
    position: Position,
    opacity: u8,
) -> OpsResult<()> {
    let p = opacity_fraction(opacity)?;
    let (bw, bh) = base.dimensions();
    let (ow, oh) = over.dimensions();
    debug!(bw, bh, ow, oh, ?position, opacity, "overlay");

    let (ax, ay) = position.anchor(bw, bh, ow, oh);
    for oy in 0..oh {
        let by = ay + oy as i64;
        if by < 0 || by >= bh as i64 {
            continue;
        }
        for ox in 0..ow {
            let bx = ax + ox as i64;
            if bx < 0 || bx >= bw as i64 {
                continue;
            }
            let (bx, by) = (bx as u32, by as u32);
            let mixed = blend_pixel(base.pixel(bx, by), over.pixel(ox, oy), p);
            base.put_pixel(bx, by, mixed);
        }
    }
    Ok(())
}

/// Full-canvas layer merge.
///
/// Builds a transparent canvas the size of `base`, copies `over` onto it at
/// full opacity (clipped to the canvas), then merges `base` over the canvas
/// at `opacity` percent. The canvas (overlay) alpha is kept where the
/// overlay landed.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `opacity > 100`.
pub fn layer(base: &PixelBuffer, over: &PixelBuffer, opacity: u8) -> OpsResult<PixelBuffer> {
    let p = opacity_fraction(opacity)?;
    let (bw, bh) = base.dimensions();
    debug!(bw, bh, opacity, "layer");

    let mut canvas = PixelBuffer::new(bw, bh)?;
    let copy_region = Rect::from_size(over.width().min(bw), over.height().min(bh));
    for y in 0..copy_region.height {
        for x in 0..copy_region.width {
            canvas.put_pixel(x, y, over.pixel(x, y));
        }
    }
    for y in 0..bh {
        for x in 0..bw {
            let mixed = blend_pixel(canvas.pixel(x, y), base.pixel(x, y), p);
            canvas.put_pixel(x, y, mixed);
        }
    }
    Ok(canvas)
}

fn opacity_fraction(opacity: u8) -> OpsResult<f32> {
    if opacity > 100 {
        return Err(OpsError::InvalidParameter(format!(
            "opacity must be 0..=100 percent, got {opacity}"
        )));
    }
    Ok(opacity as f32 / 100.0)
}
