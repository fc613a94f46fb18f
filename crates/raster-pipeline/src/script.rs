//! JSON script parsing and the single-shot interpreter.
//!
//! A script is a JSON array of command objects:
//!
//! ```json
//! [
//!   { "command": "resize", "params": [800, 600] },
//!   { "command": "vignette" },
//!   { "command": "greyscale" }
//! ]
//! ```
//!
//! Commands run in array order against one pipeline. Unknown command names
//! are skipped with a debug log rather than failing the run, so scripts
//! written against a newer command set degrade instead of erroring. Known
//! commands with malformed parameters still fail hard.
//!
//! An [`Interpreter`] runs exactly once. After a run completes (or fails),
//! further calls return [`PipelineError::AlreadyRun`].

use crate::{Operation, Pipeline, PipelineError, PipelineResult};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One entry in a script: a command name plus positional parameters.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScriptCommand {
    /// Command name, matched against the operation registry.
    pub command: String,
    /// Positional JSON parameters; absent means empty.
    #[serde(default)]
    pub params: Vec<Value>,
}

/// A parsed, not-yet-validated command sequence.
///
/// Parsing only checks JSON shape; command names and parameter types are
/// resolved when the interpreter reaches each entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    commands: Vec<ScriptCommand>,
}

impl Script {
    /// Parses a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ScriptParse`] when the text is not a JSON
    /// array of command objects.
    pub fn from_json(text: &str) -> PipelineResult<Self> {
        let commands: Vec<ScriptCommand> =
            serde_json::from_str(text).map_err(|e| PipelineError::ScriptParse(e.to_string()))?;
        Ok(Self { commands })
    }

    /// Reads and parses a script file.
    pub fn load<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let text = fs::read_to_string(path.as_ref())
            .map_err(|e| PipelineError::ScriptParse(e.to_string()))?;
        Self::from_json(&text)
    }

    /// The commands in execution order.
    pub fn commands(&self) -> &[ScriptCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the script has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Interpreter lifecycle. `Running` is observable only from a reentrant
/// call, which the single-shot contract forbids anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InterpreterState {
    #[default]
    Idle,
    Running,
    Done,
}

/// A single-shot script runner.
#[derive(Debug, Default)]
pub struct Interpreter {
    state: InterpreterState,
}

impl Interpreter {
    /// Creates an idle interpreter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this interpreter has already consumed its one run.
    pub fn is_done(&self) -> bool {
        self.state != InterpreterState::Idle
    }

    /// Runs every script command against the pipeline, in order.
    ///
    /// Unknown commands are skipped; known commands with bad parameters or
    /// failing operations abort the run. Either way the interpreter is
    /// spent afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::AlreadyRun`] on a second call, and
    /// propagates parameter and operation errors.
    pub fn run(&mut self, pipeline: Pipeline, script: &Script) -> PipelineResult<Pipeline> {
        if self.state != InterpreterState::Idle {
            return Err(PipelineError::AlreadyRun);
        }
        self.state = InterpreterState::Running;
        let result = Self::execute(pipeline, script);
        self.state = InterpreterState::Done;
        result
    }

    fn execute(mut pipeline: Pipeline, script: &Script) -> PipelineResult<Pipeline> {
        let mut applied = 0usize;
        for entry in script.commands() {
            match Operation::parse(&entry.command, &entry.params)? {
                Some(op) => {
                    debug!(command = %entry.command, "applying");
                    pipeline = op.apply(pipeline)?;
                    applied += 1;
                }
                None => {
                    debug!(command = %entry.command, "skipping unknown command");
                }
            }
        }
        info!(applied, total = script.len(), "script complete");
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_core::{OutputFormat, PixelBuffer};

    fn pipeline() -> Pipeline {
        Pipeline::new(
            PixelBuffer::filled(200, 200, [200, 60, 60, 255]).unwrap(),
            OutputFormat::Png,
        )
    }

    #[test]
    fn test_script_parses_commands() {
        let script = Script::from_json(
            r#"[
                { "command": "resize", "params": [100, 100] },
                { "command": "vignette" }
            ]"#,
        )
        .unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.commands()[0].command, "resize");
        assert_eq!(script.commands()[1].params, Vec::<serde_json::Value>::new());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Script::from_json("{ not json"),
            Err(PipelineError::ScriptParse(_))
        ));
        // an object instead of an array is also a shape error
        assert!(matches!(
            Script::from_json(r#"{ "command": "resize" }"#),
            Err(PipelineError::ScriptParse(_))
        ));
    }

    #[test]
    fn test_unknown_commands_are_skipped() {
        let script = Script::from_json(
            r#"[
                { "command": "resize", "params": [100, 100] },
                { "command": "unknownOp", "params": [1, 2] },
                { "command": "greyscale" }
            ]"#,
        )
        .unwrap();
        let out = Interpreter::new().run(pipeline(), &script).unwrap();
        assert_eq!(out.buffer().dimensions(), (100, 100));
        let px = out.buffer().get(50, 50).unwrap();
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn test_bad_params_on_known_command_fail() {
        let script = Script::from_json(
            r#"[ { "command": "resize", "params": ["wide"] } ]"#,
        )
        .unwrap();
        assert!(matches!(
            Interpreter::new().run(pipeline(), &script),
            Err(PipelineError::Parameter(_))
        ));
    }

    #[test]
    fn test_interpreter_is_single_shot() {
        let script = Script::from_json(r#"[ { "command": "negative" } ]"#).unwrap();
        let mut interp = Interpreter::new();
        assert!(!interp.is_done());
        interp.run(pipeline(), &script).unwrap();
        assert!(interp.is_done());
        assert!(matches!(
            interp.run(pipeline(), &script),
            Err(PipelineError::AlreadyRun)
        ));
    }

    #[test]
    fn test_failed_run_still_spends_the_interpreter() {
        let script = Script::from_json(r#"[ { "command": "brightness", "params": [999] } ]"#)
            .unwrap();
        let mut interp = Interpreter::new();
        assert!(interp.run(pipeline(), &script).is_err());
        assert!(matches!(
            interp.run(pipeline(), &script),
            Err(PipelineError::AlreadyRun)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(&path, r#"[ { "command": "fisheye" } ]"#).unwrap();
        let script = Script::load(&path).unwrap();
        assert_eq!(script.commands()[0].command, "fisheye");
        assert!(Script::load(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_empty_script_is_a_noop() {
        let script = Script::from_json("[]").unwrap();
        assert!(script.is_empty());
        let out = Interpreter::new().run(pipeline(), &script).unwrap();
        assert_eq!(out.buffer().get(0, 0).unwrap(), [200, 60, 60, 255]);
    }
}
