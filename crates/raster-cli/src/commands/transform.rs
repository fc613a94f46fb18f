//! Flip and rotate commands.

use crate::{FlipArgs, RotateArgs};
use anyhow::{bail, Result};
use raster_ops::Flip;

pub fn run_flip(args: FlipArgs, verbose: bool) -> Result<()> {
    let Some(direction) = Flip::parse(&args.direction) else {
        bail!("unknown flip direction {:?} (expected h, v, or b)", args.direction);
    };

    let pipeline = super::open_pipeline(&args.input)?;
    if verbose {
        println!("Flipping {} ({:?})", args.input.display(), direction);
    }

    let pipeline = pipeline.flip(direction)?;
    super::save_pipeline(pipeline, &args.output)
}

pub fn run_rotate(args: RotateArgs, verbose: bool) -> Result<()> {
    let pipeline = super::open_pipeline(&args.input)?;
    if verbose {
        println!("Rotating {} by {} degrees", args.input.display(), args.angle);
    }

    let pipeline = pipeline.rotate(args.angle)?;
    super::save_pipeline(pipeline, &args.output)
}
