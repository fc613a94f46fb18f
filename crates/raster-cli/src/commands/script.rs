//! JSON script runner command.

use crate::ScriptArgs;
use anyhow::{Context, Result};
use raster_pipeline::{Interpreter, Script};

pub fn run(args: ScriptArgs, verbose: bool) -> Result<()> {
    let script = Script::load(&args.script)
        .with_context(|| format!("Failed to parse script: {}", args.script.display()))?;
    let pipeline = super::open_pipeline(&args.input)?;

    if verbose {
        println!(
            "Running {} commands from {}",
            script.len(),
            args.script.display()
        );
    }

    let pipeline = Interpreter::new()
        .run(pipeline, &script)
        .context("Script execution failed")?;

    super::save_pipeline(pipeline, &args.output)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
