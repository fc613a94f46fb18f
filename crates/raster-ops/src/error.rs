//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Images have incompatible sizes.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Buffer-level failure bubbled up from raster-core.
    #[error(transparent)]
    Core(#[from] raster_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
