//! # raster-io
//!
//! Image I/O for raster pipelines: JPEG, PNG, and GIF decode/encode plus
//! magic-byte format detection.
//!
//! This crate is the filesystem boundary of the workspace. The pipeline
//! core never touches paths or codecs directly; it hands buffers to
//! [`decode`]/[`encode`]/[`read`]/[`write`] here.
//!
//! # Example
//!
//! ```rust,no_run
//! use raster_io::{read, write};
//! use raster_core::OutputFormat;
//!
//! let (buf, source_format) = read("photo.jpg")?;
//! write(&buf, OutputFormat::Png, "photo.png")?;
//! # Ok::<(), raster_io::IoError>(())
//! ```
//!
//! # Encoding policy
//!
//! The pipeline's `OutputFormat` tag is deliberately decoupled from pixel
//! data; it is this crate that makes a buffer format-compatible at encode
//! time (alpha is flattened over black for JPEG, see [`codec`]).

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod detect;
mod error;

pub use codec::{decode, encode, read, write};
pub use detect::{detect as detect_format, from_magic_bytes, validate_source};
pub use error::{IoError, IoResult};
