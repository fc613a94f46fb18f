//! The owned RGBA8 image buffer.
//!
//! # Memory layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, with interleaved
//! channels:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use raster_core::PixelBuffer;
//!
//! // A zero-initialized (fully transparent black) 64x48 buffer
//! let mut buf = PixelBuffer::new(64, 48).unwrap();
//!
//! buf.set(10, 10, [255, 0, 0, 255]).unwrap();
//! assert_eq!(buf.get(10, 10).unwrap(), [255, 0, 0, 255]);
//!
//! // Out-of-bounds access is a typed error, not a panic
//! assert!(buf.get(64, 0).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`crate::error::Error`] - Bounds and dimension errors
//!
//! # Used By
//!
//! - `raster-ops` - Effect algorithms and compositing
//! - `raster-io` - Decode/encode boundary
//! - `raster-pipeline` - The buffer owned and threaded by the pipeline

use crate::pixel::Rgba;
use crate::rect::Rect;
use crate::{Error, Result};

/// Number of channels per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// Owned, dense, row-major RGBA8 image buffer.
///
/// Width and height are both strictly positive and invariant for the
/// buffer's lifetime. The buffer is exclusively owned by whichever component
/// currently holds it; effects either mutate it in place or consume it and
/// produce a new owned buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Interleaved RGBA pixel data, `width * height * 4` bytes.
    data: Vec<u8>,
    /// Buffer width in pixels.
    width: u32,
    /// Buffer height in pixels.
    height: u32,
}

impl PixelBuffer {
    /// Creates a zero-initialized (fully transparent black) buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use raster_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::new(100, 50).unwrap();
    /// assert_eq!(buf.width(), 100);
    /// assert_eq!(buf.height(), 50);
    /// assert_eq!(buf.get(0, 0).unwrap(), [0, 0, 0, 0]);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "width and height must be > 0",
            ));
        }
        let len = width as usize * height as usize * CHANNELS;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
        })
    }

    /// Creates a buffer filled with a single pixel value.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Result<Self> {
        let mut buf = Self::new(width, height)?;
        buf.fill(pixel);
        Ok(buf)
    }

    /// Creates a buffer from existing interleaved RGBA data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the data length is not
    /// exactly `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "width and height must be > 0",
            ));
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the buffer dimensions as `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns a rectangle covering the entire buffer.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns a reference to the raw interleaved RGBA data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the raw interleaved RGBA data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns the raw data.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Returns the byte offset of pixel (x, y).
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Result<Rgba> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let o = self.offset(x, y);
        Ok([self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]])
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when `x >= width` or `y >= height`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let o = self.offset(x, y);
        self.data[o..o + CHANNELS].copy_from_slice(&pixel);
        Ok(())
    }

    /// Returns the pixel at coordinates clamped to the nearest in-bounds
    /// position (edge replication).
    ///
    /// Accepts signed coordinates so convolution neighborhoods can reach past
    /// the border without pre-clamping at every call site.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> Rgba {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        let o = self.offset(cx, cy);
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// Unchecked pixel read. Callers must guarantee `x < width, y < height`.
    ///
    /// This is the hot-loop accessor used by effects that iterate the
    /// buffer's own extents; the bounds proof lives in the loop structure.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// Unchecked pixel write. Callers must guarantee `x < width, y < height`.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Rgba) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        self.data[o..o + CHANNELS].copy_from_slice(&pixel);
    }

    /// Fills the entire buffer with a pixel value.
    pub fn fill(&mut self, pixel: Rgba) {
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Returns one row of interleaved RGBA bytes.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * CHANNELS;
        let end = start + self.width as usize * CHANNELS;
        &self.data[start..end]
    }

    /// Returns one mutable row of interleaved RGBA bytes.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * CHANNELS;
        let end = start + self.width as usize * CHANNELS;
        &mut self.data[start..end]
    }

    /// Iterates over all pixels with their coordinates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use raster_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::filled(4, 4, [9, 9, 9, 255]).unwrap();
    /// assert!(buf.pixels().all(|(_, _, px)| px == [9, 9, 9, 255]));
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgba)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Applies a function to each pixel in place.
    ///
    /// This is the in-place path for effects without cross-pixel reads
    /// (brightness, negate, colorize and friends).
    pub fn map_pixels<F>(&mut self, mut f: F)
    where
        F: FnMut(Rgba) -> Rgba,
    {
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            let px = [chunk[0], chunk[1], chunk[2], chunk[3]];
            chunk.copy_from_slice(&f(px));
        }
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zero_initialized() {
        let buf = PixelBuffer::new(7, 5).unwrap();
        assert_eq!(buf.pixel_count(), 35);
        for (_, _, px) in buf.pixels() {
            assert_eq!(px, [0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(PixelBuffer::new(0, 5).is_err());
        assert!(PixelBuffer::new(5, 0).is_err());
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        buf.set(3, 4, [1, 2, 3, 4]).unwrap();
        assert_eq!(buf.get(3, 4).unwrap(), [1, 2, 3, 4]);
        assert_eq!(buf.get(4, 3).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        assert!(buf.get(10, 0).is_err());
        assert!(buf.get(0, 10).is_err());
        assert!(buf.set(10, 10, [0; 4]).is_err());
    }

    #[test]
    fn test_from_raw_length_check() {
        let ok = PixelBuffer::from_raw(2, 2, vec![0; 16]);
        assert!(ok.is_ok());
        let bad = PixelBuffer::from_raw(2, 2, vec![0; 15]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_get_clamped_replicates_edges() {
        let mut buf = PixelBuffer::new(3, 3).unwrap();
        buf.set(0, 0, [10, 20, 30, 255]).unwrap();
        buf.set(2, 2, [40, 50, 60, 255]).unwrap();
        assert_eq!(buf.get_clamped(-1, -1), [10, 20, 30, 255]);
        assert_eq!(buf.get_clamped(5, 5), [40, 50, 60, 255]);
    }

    #[test]
    fn test_fill_and_map_pixels() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        buf.fill([100, 100, 100, 255]);
        buf.map_pixels(|px| [px[0] / 2, px[1] / 2, px[2] / 2, px[3]]);
        assert_eq!(buf.get(2, 2).unwrap(), [50, 50, 50, 255]);
    }

    #[test]
    fn test_row_layout() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.set(1, 0, [1, 2, 3, 4]).unwrap();
        let row = buf.row(0);
        assert_eq!(row.len(), 8);
        assert_eq!(&row[4..8], &[1, 2, 3, 4]);
    }
}
