//! Format detection from magic bytes.
//!
//! The decoder never trusts file extensions: the source's leading bytes are
//! matched against the JPEG, PNG, and GIF signatures, and anything else is
//! an [`UnsupportedFormat`](crate::IoError::UnsupportedFormat) error.

use crate::{IoError, IoResult};
use raster_core::OutputFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PNG signature: `\x89PNG\r\n\x1a\n`.
const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Detects the format of a byte stream from its magic bytes.
///
/// # Example
///
/// ```rust
/// use raster_core::OutputFormat;
/// use raster_io::detect::from_magic_bytes;
///
/// assert_eq!(from_magic_bytes(b"GIF89a...").unwrap(), OutputFormat::Gif);
/// assert!(from_magic_bytes(b"not an image").is_err());
/// ```
pub fn from_magic_bytes(bytes: &[u8]) -> IoResult<OutputFormat> {
    if bytes.len() >= 8 && bytes[..8] == PNG_MAGIC {
        return Ok(OutputFormat::Png);
    }
    if bytes.len() >= 3 && bytes[..3] == [0xFF, 0xD8, 0xFF] {
        return Ok(OutputFormat::Jpeg);
    }
    if bytes.len() >= 6 && (&bytes[..6] == b"GIF87a" || &bytes[..6] == b"GIF89a") {
        return Ok(OutputFormat::Gif);
    }
    Err(IoError::UnsupportedFormat(
        "unrecognized magic bytes".into(),
    ))
}

/// Detects the format of a file on disk by reading its header.
///
/// # Errors
///
/// Returns [`IoError::SourceNotFound`] if the path is missing or a
/// directory, [`IoError::UnsupportedFormat`] for unrecognized content.
pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<OutputFormat> {
    let path = path.as_ref();
    validate_source(path)?;
    let mut header = [0u8; 8];
    let mut file = File::open(path)?;
    let n = file.read(&mut header)?;
    from_magic_bytes(&header[..n])
}

/// Checks that a source path exists and is not a directory.
pub fn validate_source(path: &Path) -> IoResult<()> {
    if !path.is_file() {
        return Err(IoError::SourceNotFound(path.to_path_buf()));
    }
    Ok(())
}
