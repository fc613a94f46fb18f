//! CLI command implementations

pub mod convert;
pub mod crop;
pub mod effects;
pub mod filter;
pub mod info;
pub mod resize;
pub mod script;
pub mod transform;
pub mod watermark;

use anyhow::{Context, Result};
use raster_core::OutputFormat;
use raster_pipeline::Pipeline;
use std::path::Path;
use tracing::debug;

/// Opens a pipeline from a source image path.
pub fn open_pipeline(path: &Path) -> Result<Pipeline> {
    Pipeline::open(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Writes a pipeline out, retagging the format to match the output
/// extension when it names a supported one.
pub fn save_pipeline(pipeline: Pipeline, output: &Path) -> Result<()> {
    let pipeline = match format_for(output) {
        Some(format) => {
            debug!(%format, "retagging to match output extension");
            pipeline.convert(format)
        }
        None => pipeline,
    };
    pipeline
        .write(output)
        .with_context(|| format!("Failed to write: {}", output.display()))
}

/// Maps an output path's extension to a format, when recognized.
pub fn format_for(path: &Path) -> Option<OutputFormat> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::parse)
}
