//! Blur and sharpen commands.

use crate::{BlurArgs, SharpenArgs};
use anyhow::Result;

pub fn run_blur(args: BlurArgs, verbose: bool) -> Result<()> {
    let pipeline = super::open_pipeline(&args.input)?;
    if verbose {
        println!("Blurring {} ({} passes)", args.input.display(), args.passes);
    }

    let pipeline = pipeline.blur(args.passes)?;
    super::save_pipeline(pipeline, &args.output)
}

pub fn run_sharpen(args: SharpenArgs, verbose: bool) -> Result<()> {
    let pipeline = super::open_pipeline(&args.input)?;
    if verbose {
        println!(
            "Sharpening {} ({} passes)",
            args.input.display(),
            args.passes
        );
    }

    let pipeline = pipeline.sharpen(args.passes)?;
    super::save_pipeline(pipeline, &args.output)
}
