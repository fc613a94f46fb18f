//! Format conversion command.

use crate::ConvertArgs;
use anyhow::{bail, Result};

pub fn run(args: ConvertArgs, verbose: bool) -> Result<()> {
    let Some(format) = super::format_for(&args.output) else {
        bail!(
            "output extension not recognized: {} (expected jpg, png, or gif)",
            args.output.display()
        );
    };

    let pipeline = super::open_pipeline(&args.input)?;
    if verbose {
        println!(
            "Converting {} ({}) -> {} ({})",
            args.input.display(),
            pipeline.format(),
            args.output.display(),
            format
        );
    }

    super::save_pipeline(pipeline, &args.output)
}
