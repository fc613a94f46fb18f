//! The chainable operation pipeline.
//!
//! A [`Pipeline`] owns exactly one [`PixelBuffer`] plus an [`OutputFormat`]
//! tag. Every operation consumes the pipeline and returns it (or an error),
//! so buffer ownership threads linearly from one operation to the next and
//! no aliasing is possible:
//!
//! ```rust,no_run
//! use raster_pipeline::Pipeline;
//! use raster_core::OutputFormat;
//!
//! Pipeline::open("in.jpg")?
//!     .resize(800, 600)?
//!     .vignette(1.0)?
//!     .convert(OutputFormat::Png)
//!     .write("out.png")?;
//! # Ok::<(), raster_pipeline::PipelineError>(())
//! ```
//!
//! The terminal operations [`render`](Pipeline::render) and
//! [`write`](Pipeline::write) take `self` by value and never give it back:
//! the "closed" post-terminal state is enforced by the type system rather
//! than a runtime flag.

use crate::PipelineResult;
use raster_core::{OutputFormat, PixelBuffer, Rect};
use raster_ops::{adjust, anaglyph, composite, convolve, desaturate, fisheye, noise, palette,
    threshold, transform, vignette};
use raster_ops::{Flip, Kernel3, Position};
use std::path::Path;
use tracing::{debug, info};

/// An image pipeline: one owned buffer, one output-format tag, and a
/// chainable operation per supported transform.
#[derive(Debug)]
pub struct Pipeline {
    buffer: PixelBuffer,
    format: OutputFormat,
}

impl Pipeline {
    /// Wraps an already-decoded buffer.
    pub fn new(buffer: PixelBuffer, format: OutputFormat) -> Self {
        Self { buffer, format }
    }

    /// Opens an image file; the format tag defaults to the source format.
    ///
    /// # Errors
    ///
    /// Returns [`raster_io::IoError::SourceNotFound`] (wrapped) when the
    /// path is missing or a directory, and decode errors otherwise.
    pub fn open<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let (buffer, format) = raster_io::read(path.as_ref())?;
        info!(path = %path.as_ref().display(), %format, "pipeline opened");
        Ok(Self::new(buffer, format))
    }

    /// Returns the currently held buffer.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Returns the current output-format tag.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Consumes the pipeline, releasing the buffer to the caller.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// Replaces the held buffer with a transformed one.
    fn swap(mut self, buffer: PixelBuffer) -> Self {
        self.buffer = buffer;
        self
    }

    // --- geometric -------------------------------------------------------

    /// Flips the image horizontally, vertically, or both.
    pub fn flip(self, direction: Flip) -> PipelineResult<Self> {
        let out = transform::flip(&self.buffer, direction);
        Ok(self.swap(out))
    }

    /// Resizes to an exact size (bilinear).
    pub fn resize(self, width: u32, height: u32) -> PipelineResult<Self> {
        let out = transform::resize(&self.buffer, width, height)?;
        Ok(self.swap(out))
    }

    /// Scales to fit, preserving aspect ratio.
    pub fn scale(self, width: u32, height: u32) -> PipelineResult<Self> {
        let out = transform::scale(&self.buffer, width, height)?;
        Ok(self.swap(out))
    }

    /// Crops to a rectangle.
    pub fn crop(self, x: u32, y: u32, width: u32, height: u32) -> PipelineResult<Self> {
        let out = transform::crop(&self.buffer, Rect::new(x, y, width, height))?;
        Ok(self.swap(out))
    }

    /// Rotates by degrees in `[-360, 360]`.
    pub fn rotate(self, degrees: i32) -> PipelineResult<Self> {
        let out = transform::rotate(&self.buffer, degrees)?;
        Ok(self.swap(out))
    }

    // --- tonal and color -------------------------------------------------

    /// Converts to grayscale.
    pub fn greyscale(mut self) -> PipelineResult<Self> {
        adjust::greyscale(&mut self.buffer);
        Ok(self)
    }

    /// Adjusts brightness, `level` in `[-100, 100]`.
    pub fn brightness(mut self, level: i32) -> PipelineResult<Self> {
        adjust::brightness(&mut self.buffer, level)?;
        Ok(self)
    }

    /// Adjusts contrast, `level` in `[-100, 100]`.
    pub fn contrast(mut self, level: i32) -> PipelineResult<Self> {
        adjust::contrast(&mut self.buffer, level)?;
        Ok(self)
    }

    /// Shifts channels by signed deltas.
    pub fn colorize(mut self, r: i32, g: i32, b: i32) -> PipelineResult<Self> {
        adjust::colorize(&mut self.buffer, r, g, b)?;
        Ok(self)
    }

    /// Inverts the image.
    pub fn negative(mut self) -> PipelineResult<Self> {
        adjust::negative(&mut self.buffer);
        Ok(self)
    }

    /// Applies a sepia tone.
    pub fn sepia(mut self) -> PipelineResult<Self> {
        adjust::sepia(&mut self.buffer)?;
        Ok(self)
    }

    /// Partially desaturates, `level` in `[0, 100]`.
    pub fn desaturate(mut self, level: u8) -> PipelineResult<Self> {
        desaturate::desaturate(&mut self.buffer, level)?;
        Ok(self)
    }

    // --- filters ---------------------------------------------------------

    /// Embosses the image.
    pub fn emboss(self) -> PipelineResult<Self> {
        let out = adjust::emboss(&self.buffer)?;
        Ok(self.swap(out))
    }

    /// Sketch (mean removal) filter.
    pub fn sketch(self) -> PipelineResult<Self> {
        let out = adjust::sketch(&self.buffer)?;
        Ok(self.swap(out))
    }

    /// Pixelates with `size x size` blocks.
    pub fn pixelate(mut self, size: u32) -> PipelineResult<Self> {
        adjust::pixelate(&mut self.buffer, size)?;
        Ok(self)
    }

    /// Smoothing filter with the given center weight.
    pub fn smooth(self, level: f32) -> PipelineResult<Self> {
        let out = adjust::smooth(&self.buffer, level)?;
        Ok(self.swap(out))
    }

    /// Gaussian blur, N passes.
    pub fn blur(self, passes: u32) -> PipelineResult<Self> {
        let out = adjust::blur(&self.buffer, passes)?;
        Ok(self.swap(out))
    }

    /// Sharpens, N passes.
    pub fn sharpen(self, passes: u32) -> PipelineResult<Self> {
        let out = convolve::sharpen(&self.buffer, passes)?;
        Ok(self.swap(out))
    }

    /// Generic 3x3 convolution.
    pub fn convolution(self, kernel: Kernel3) -> PipelineResult<Self> {
        let out = convolve::convolve3(&self.buffer, &kernel)?;
        Ok(self.swap(out))
    }

    // --- effects ---------------------------------------------------------

    /// Vignette shading with the given exponent.
    pub fn vignette(self, exponent: f64) -> PipelineResult<Self> {
        let out = vignette::vignette(&self.buffer, exponent)?;
        Ok(self.swap(out))
    }

    /// Fisheye lens remap.
    pub fn fisheye(self) -> PipelineResult<Self> {
        let out = fisheye::fisheye(&self.buffer)?;
        Ok(self.swap(out))
    }

    /// Adds uniform noise.
    pub fn noise(mut self, level: u8) -> PipelineResult<Self> {
        noise::noise(&mut self.buffer, level);
        Ok(self)
    }

    /// Binary black/white threshold.
    pub fn black_white(mut self, level: i32) -> PipelineResult<Self> {
        threshold::black_white(&mut self.buffer, level);
        Ok(self)
    }

    /// Anaglyph duplicate compositing.
    pub fn anaglyph(self) -> PipelineResult<Self> {
        let out = anaglyph::anaglyph(&self.buffer)?;
        Ok(self.swap(out))
    }

    /// Nearest-palette-entry color replacement.
    pub fn replace(mut self, target: [u8; 3], replacement: [u8; 3]) -> PipelineResult<Self> {
        palette::replace_color(&mut self.buffer, target, replacement);
        Ok(self)
    }

    // --- compositing -----------------------------------------------------

    /// Overlays an image loaded from `path` at the given position, fully
    /// opaque. The overlay path is validated like the primary source.
    pub fn watermark<P: AsRef<Path>>(self, path: P, position: Position) -> PipelineResult<Self> {
        self.watermark_with_opacity(path, position, 100)
    }

    /// Overlays an image at the given position and opacity percent.
    pub fn watermark_with_opacity<P: AsRef<Path>>(
        mut self,
        path: P,
        position: Position,
        opacity: u8,
    ) -> PipelineResult<Self> {
        let (over, _) = raster_io::read(path)?;
        composite::overlay(&mut self.buffer, &over, position, opacity)?;
        Ok(self)
    }

    /// Merges an image loaded from `path` as a full-canvas layer.
    pub fn layer<P: AsRef<Path>>(self, path: P, opacity: u8) -> PipelineResult<Self> {
        let (over, _) = raster_io::read(path)?;
        let out = composite::layer(&self.buffer, &over, opacity)?;
        Ok(self.swap(out))
    }

    // --- format and terminals --------------------------------------------

    /// Rewrites the output-format tag. Pixel data is untouched; making the
    /// buffer format-compatible is the encoder's job at render/write time.
    pub fn convert(mut self, format: OutputFormat) -> Self {
        debug!(%format, "convert");
        self.format = format;
        self
    }

    /// Terminal: encodes the buffer in the tagged format and releases it.
    pub fn render(self) -> PipelineResult<Vec<u8>> {
        Ok(raster_io::encode(&self.buffer, self.format)?)
    }

    /// Terminal: encodes and writes the buffer to disk, then releases it.
    pub fn write<P: AsRef<Path>>(self, path: P) -> PipelineResult<()> {
        raster_io::write(&self.buffer, self.format, path.as_ref())?;
        info!(path = %path.as_ref().display(), format = %self.format, "pipeline written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PipelineError;

    fn pipeline_of(width: u32, height: u32, px: [u8; 4]) -> Pipeline {
        Pipeline::new(
            PixelBuffer::filled(width, height, px).unwrap(),
            OutputFormat::Png,
        )
    }

    #[test]
    fn test_chaining_threads_ownership() {
        let p = pipeline_of(40, 40, [200, 100, 50, 255])
            .resize(20, 20)
            .unwrap()
            .greyscale()
            .unwrap()
            .black_white(10)
            .unwrap();
        assert_eq!(p.buffer().dimensions(), (20, 20));
        let px = p.buffer().get(5, 5).unwrap();
        assert!(px[0] == 0 || px[0] == 255);
    }

    #[test]
    fn test_convert_only_rewrites_tag() {
        let p = pipeline_of(4, 4, [1, 2, 3, 200]);
        let before = p.buffer().clone();
        let p = p.convert(OutputFormat::Jpeg);
        assert_eq!(p.format(), OutputFormat::Jpeg);
        assert_eq!(*p.buffer(), before);
    }

    #[test]
    fn test_parameter_error_propagates() {
        let p = pipeline_of(4, 4, [0, 0, 0, 255]);
        let err = p.brightness(500).unwrap_err();
        assert!(matches!(err, PipelineError::Ops(_)));
    }

    #[test]
    fn test_crop_out_of_bounds_is_error() {
        let p = pipeline_of(4, 4, [0, 0, 0, 255]);
        assert!(p.crop(2, 2, 4, 4).is_err());
    }

    #[test]
    fn test_render_encodes_tagged_format() {
        let bytes = pipeline_of(8, 8, [10, 20, 30, 255]).render().unwrap();
        // PNG magic
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);

        let bytes = pipeline_of(8, 8, [10, 20, 30, 255])
            .convert(OutputFormat::Jpeg)
            .render()
            .unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_open_missing_source() {
        let err = Pipeline::open("/nope/missing.png").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Io(raster_io::IoError::SourceNotFound(_))
        ));
    }

    #[test]
    fn test_write_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        pipeline_of(6, 6, [9, 8, 7, 255]).write(&path).unwrap();
        let p = Pipeline::open(&path).unwrap();
        assert_eq!(p.format(), OutputFormat::Png);
        assert_eq!(p.buffer().get(0, 0).unwrap(), [9, 8, 7, 255]);
    }
}
