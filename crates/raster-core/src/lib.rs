//! # raster-core
//!
//! Core types for raster image manipulation.
//!
//! This crate provides the foundational types used throughout the raster-rs
//! workspace:
//!
//! - [`PixelBuffer`] - Owned, dense, row-major RGBA8 image buffer
//! - [`Rgba`] - A single 8-bit-per-channel RGBA sample
//! - [`Rect`] - Rectangular region for crop and overlay placement
//! - [`OutputFormat`] - Intended encoding target (JPEG, PNG, GIF)
//!
//! ## Ownership model
//!
//! A [`PixelBuffer`] has exactly one owner at a time. Effects either mutate
//! it in place or consume it and return a freshly allocated buffer; there is
//! never more than one live mutable reference to the same pixel data. This
//! is what lets effects read stale values from the input while writing a
//! separate output, then swap.
//!
//! ## Crate structure
//!
//! `raster-core` sits at the bottom of the workspace and has no internal
//! dependencies:
//!
//! ```text
//! raster-core (this crate)
//!    ^
//!    |
//!    +-- raster-ops      (effects, convolution, compositing)
//!    +-- raster-io       (decode/encode, format detection)
//!    +-- raster-pipeline (chainable pipeline, script interpreter)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod format;
pub mod pixel;
pub mod rect;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use format::OutputFormat;
pub use pixel::{
    clamp_channel, gray_average, rgb_distance_sq, saturating_add, Rgba, ALPHA_OPAQUE,
    ALPHA_TRANSPARENT,
};
pub use rect::Rect;
