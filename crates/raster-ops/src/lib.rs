//! # raster-ops
//!
//! Pixel-level effect algorithms and compositing for raster pipelines.
//!
//! This crate implements the custom algorithms that cannot be delegated to a
//! single library call, plus the simpler adjustment and geometric operations
//! the pipeline chains around them.
//!
//! # Modules
//!
//! - [`vignette`] - Sinusoidal frame shading with alpha falloff
//! - [`fisheye`] - Fisheye lens remap onto a square canvas
//! - [`noise`] - Uniform per-pixel noise injection
//! - [`threshold`] - Binary black/white conversion
//! - [`anaglyph`] - Cyan-shifted duplicate compositing
//! - [`convolve`] - Generic 3x3 convolution and the kernels built on it
//! - [`palette`] - Indexed-palette nearest-color replacement
//! - [`desaturate`] - Partial grayscale blending
//! - [`composite`] - Watermark overlay and full-canvas layering
//! - [`adjust`] - Brightness, contrast, colorize and friends
//! - [`transform`] - Flip, crop, resize, scale, rotate
//!
//! # Buffer discipline
//!
//! Every operation either mutates its buffer in place (`&mut PixelBuffer`)
//! or reads an input while writing a completely separate output
//! (`&PixelBuffer -> OpsResult<PixelBuffer>`). Effects that sample
//! neighborhoods or remap coordinates always take the second form, so stale
//! input values stay readable until the new buffer is complete.
//!
//! # Example
//!
//! ```rust
//! use raster_core::PixelBuffer;
//! use raster_ops::{convolve, threshold};
//!
//! let mut buf = PixelBuffer::filled(16, 16, [200, 40, 40, 255]).unwrap();
//! threshold::black_white(&mut buf, 20);
//!
//! let sharpened = convolve::sharpen(&buf, 1).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

pub mod adjust;
pub mod anaglyph;
pub mod composite;
pub mod convolve;
pub mod desaturate;
pub mod fisheye;
pub mod noise;
pub mod palette;
pub mod threshold;
pub mod transform;
pub mod vignette;

pub use composite::Position;
pub use convolve::Kernel3;
pub use error::{OpsError, OpsResult};
pub use transform::Flip;
