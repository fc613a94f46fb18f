//! # raster-pipeline
//!
//! The chainable image pipeline and its JSON script interpreter.
//!
//! # Overview
//!
//! [`Pipeline`] wraps one decoded [`raster_core::PixelBuffer`] plus an
//! output-format tag and exposes every supported operation as a consuming
//! method, so edits chain linearly and the terminal operations
//! ([`Pipeline::render`], [`Pipeline::write`]) retire the pipeline by
//! taking ownership.
//!
//! [`Script`] parses a JSON command array and [`Interpreter`] replays it
//! against a pipeline exactly once, skipping commands it does not know.
//!
//! # Example
//!
//! ```rust
//! use raster_core::{OutputFormat, PixelBuffer};
//! use raster_pipeline::{Interpreter, Pipeline, Script};
//!
//! let buffer = PixelBuffer::filled(64, 64, [180, 90, 30, 255]).unwrap();
//! let pipeline = Pipeline::new(buffer, OutputFormat::Png);
//!
//! let script = Script::from_json(
//!     r#"[ { "command": "resize", "params": [32, 32] },
//!          { "command": "greyscale" } ]"#,
//! ).unwrap();
//!
//! let done = Interpreter::new().run(pipeline, &script).unwrap();
//! assert_eq!(done.buffer().dimensions(), (32, 32));
//! ```
//!
//! # Dependencies
//!
//! - [`raster-core`](raster_core) - Buffer, format, and error primitives
//! - [`raster-ops`](raster_ops) - The operation implementations
//! - [`raster-io`](raster_io) - Decode on open, encode on render/write
//! - `serde`/`serde_json` - Script deserialization
//!
//! # Used By
//!
//! - `raster-cli` - Command-line frontend

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod op;
mod pipeline;
mod script;

pub use error::{PipelineError, PipelineResult};
pub use op::Operation;
pub use pipeline::Pipeline;
pub use script::{Interpreter, Script, ScriptCommand};
