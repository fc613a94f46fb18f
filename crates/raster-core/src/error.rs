//! Error types for core buffer operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of buffer construction and
//! pixel access. Out-of-bounds access is reported as a typed error rather
//! than a panic: correctly written effects never surface it to a caller, so
//! seeing one indicates an internal invariant violation upstream.
//!
//! # Usage
//!
//! ```rust
//! use raster_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::OutOfBounds { x, y, width, height });
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during core buffer operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside the buffer bounds.
    ///
    /// Returned when accessing a pixel at (x, y) where `x >= width` or
    /// `y >= height`.
    #[error("pixel ({x}, {y}) out of bounds for buffer {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Invalid buffer dimensions.
    ///
    /// Returned when width or height is zero, or when dimensions do not
    /// match the supplied pixel data.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why the dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a bounds error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_display() {
        let err = Error::out_of_bounds(12, 34, 10, 20);
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("34"));
        assert!(msg.contains("10x20"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_invalid_dimensions_display() {
        let err = Error::invalid_dimensions(0, 10, "width must be > 0");
        assert!(err.to_string().contains("0x10"));
        assert!(!err.is_bounds_error());
    }
}
