//! Output format tag.
//!
//! The pipeline carries an [`OutputFormat`] alongside its buffer. The tag
//! records the *intended* encoding target only: changing it never alters
//! pixel data (it does not strip alpha for formats that lack it). Making the
//! buffer format-compatible before encoding is the encoder's concern; see
//! `raster-io`, which flattens alpha when writing JPEG.

use std::fmt;

/// Intended encoding target for a pipeline's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JPEG (no alpha channel; alpha is flattened at encode time).
    Jpeg,
    /// PNG (full RGBA).
    #[default]
    Png,
    /// GIF (1-bit alpha, indexed color).
    Gif,
}

impl OutputFormat {
    /// Parses a format name, case-insensitively.
    ///
    /// Returns `None` for unrecognized names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use raster_core::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::parse("PNG"), Some(OutputFormat::Png));
    /// assert_eq!(OutputFormat::parse("jpeg"), Some(OutputFormat::Jpeg));
    /// assert_eq!(OutputFormat::parse("bmp"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Returns the canonical file extension for this format.
    #[inline]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }

    /// Returns the MIME type for this format.
    #[inline]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    /// Returns `true` if the encoded form carries an alpha channel.
    #[inline]
    pub const fn supports_alpha(&self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
        };
        f.write_str(name)
    }
}
