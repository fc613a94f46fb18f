//! Decode and encode between files/bytes and [`PixelBuffer`].
//!
//! The actual codecs come from the `image` crate; this module owns the
//! boundary policy:
//!
//! - Everything decodes to RGBA8 regardless of the source's channel layout.
//! - JPEG has no alpha: encoding flattens RGBA over black (each channel is
//!   premultiplied by its alpha) before handing RGB to the encoder. The
//!   format tag itself never mutates pixels; the flatten happens here, at
//!   the last possible moment.
//! - GIF keeps the 1-bit alpha the encoder derives from the RGBA input.

use crate::detect::{from_magic_bytes, validate_source};
use crate::{IoError, IoResult};
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, Frame, ImageEncoder, ImageReader, RgbaImage};
use raster_core::{OutputFormat, PixelBuffer};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Decodes a byte slice into a [`PixelBuffer`].
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unrecognized magic bytes and
/// [`IoError::Decode`] for corrupt image data. The detected
/// [`OutputFormat`] is returned alongside the buffer so a pipeline can
/// default its tag to the source format.
pub fn decode(bytes: &[u8]) -> IoResult<(PixelBuffer, OutputFormat)> {
    let format = from_magic_bytes(bytes)?;
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()
        .map_err(|e| IoError::Decode(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(width, height, %format, "decoded image");
    let buf = PixelBuffer::from_raw(width, height, rgba.into_raw())?;
    Ok((buf, format))
}

/// Reads and decodes an image file.
///
/// # Errors
///
/// Returns [`IoError::SourceNotFound`] if the path is missing or a
/// directory, plus the [`decode`] failure modes.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<(PixelBuffer, OutputFormat)> {
    let path = path.as_ref();
    validate_source(path)?;
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Encodes a buffer into the given format.
pub fn encode(buf: &PixelBuffer, format: OutputFormat) -> IoResult<Vec<u8>> {
    let (width, height) = buf.dimensions();
    debug!(width, height, %format, "encoding image");
    let mut out = Vec::new();
    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut out)
                .write_image(buf.data(), width, height, ExtendedColorType::Rgba8)
                .map_err(|e| IoError::Encode(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            let rgb = flatten_over_black(buf);
            JpegEncoder::new(&mut out)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| IoError::Encode(e.to_string()))?;
        }
        OutputFormat::Gif => {
            let rgba = RgbaImage::from_raw(width, height, buf.data().to_vec())
                .ok_or_else(|| IoError::Encode("buffer length mismatch".into()))?;
            let mut encoder = GifEncoder::new(&mut out);
            encoder
                .encode_frame(Frame::new(rgba))
                .map_err(|e| IoError::Encode(e.to_string()))?;
        }
    }
    Ok(out)
}

/// Encodes and writes a buffer to disk.
pub fn write<P: AsRef<Path>>(buf: &PixelBuffer, format: OutputFormat, path: P) -> IoResult<()> {
    let bytes = encode(buf, format)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Drops alpha by compositing over black: `channel * alpha / 255`.
fn flatten_over_black(buf: &PixelBuffer) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(buf.pixel_count() * 3);
    for chunk in buf.data().chunks_exact(4) {
        let a = chunk[3] as u16;
        rgb.push((chunk[0] as u16 * a / 255) as u8);
        rgb.push((chunk[1] as u16 * a / 255) as u8);
        rgb.push((chunk[2] as u16 * a / 255) as u8);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let px = if (x + y) % 2 == 0 {
                    [255, 0, 0, 255]
                } else {
                    [0, 0, 255, 255]
                };
                buf.put_pixel(x, y, px);
            }
        }
        buf
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let src = checker(16, 12);
        let bytes = encode(&src, OutputFormat::Png).unwrap();
        let (decoded, format) = decode(&bytes).unwrap();
        assert_eq!(format, OutputFormat::Png);
        assert_eq!(decoded, src);
    }

    #[test]
    fn test_jpeg_encode_drops_alpha() {
        let src = PixelBuffer::filled(8, 8, [200, 100, 50, 255]).unwrap();
        let bytes = encode(&src, OutputFormat::Jpeg).unwrap();
        // JPEG magic confirms the encoder ran; lossy content not compared.
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
        let (decoded, format) = decode(&bytes).unwrap();
        assert_eq!(format, OutputFormat::Jpeg);
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoded.get(0, 0).unwrap()[3], 255);
    }

    #[test]
    fn test_gif_encode_decode_dimensions() {
        let src = checker(10, 10);
        let bytes = encode(&src, OutputFormat::Gif).unwrap();
        let (decoded, format) = decode(&bytes).unwrap();
        assert_eq!(format, OutputFormat::Gif);
        assert_eq!(decoded.dimensions(), (10, 10));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode(b"definitely not an image").is_err());
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let src = checker(6, 6);
        write(&src, OutputFormat::Png, &path).unwrap();
        let (decoded, _) = read(&path).unwrap();
        assert_eq!(decoded, src);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read("/does/not/exist.png").unwrap_err();
        assert!(matches!(err, IoError::SourceNotFound(_)));
    }

    #[test]
    fn test_flatten_over_black() {
        let mut buf = PixelBuffer::filled(1, 1, [200, 100, 50, 127]).unwrap();
        buf.set(0, 0, [200, 100, 50, 127]).unwrap();
        let rgb = flatten_over_black(&buf);
        assert_eq!(rgb, vec![99, 49, 24]);
    }
}
