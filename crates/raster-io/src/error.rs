//! Error types for I/O operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// Source path does not exist or is a directory.
    #[error("source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Unrecognized or unsupported image format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    Decode(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    Encode(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Buffer-level failure bubbled up from raster-core.
    #[error(transparent)]
    Core(#[from] raster_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
