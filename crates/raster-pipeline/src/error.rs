//! Error types for pipeline execution and script replay.

use thiserror::Error;

/// Pipeline operation error.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Operation argument out of its documented range, or a script command
    /// with the wrong parameter arity or types.
    #[error("invalid parameter: {0}")]
    Parameter(String),

    /// Malformed script structure (top-level JSON shape).
    #[error("script parse error: {0}")]
    ScriptParse(String),

    /// An interpreter was asked to run a second time.
    #[error("interpreter is not restartable once done")]
    AlreadyRun,

    /// Effect-level failure.
    #[error(transparent)]
    Ops(#[from] raster_ops::OpsError),

    /// I/O or codec failure.
    #[error(transparent)]
    Io(#[from] raster_io::IoError),

    /// Buffer-level failure.
    #[error(transparent)]
    Core(#[from] raster_core::Error),
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
