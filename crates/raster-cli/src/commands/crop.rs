//! Crop command.

use crate::CropArgs;
use anyhow::Result;

pub fn run(args: CropArgs, verbose: bool) -> Result<()> {
    let pipeline = super::open_pipeline(&args.input)?;

    if verbose {
        println!(
            "Cropping {} to {}x{} at ({}, {})",
            args.input.display(),
            args.w,
            args.h,
            args.x,
            args.y
        );
    }

    let pipeline = pipeline.crop(args.x, args.y, args.w, args.h)?;
    super::save_pipeline(pipeline, &args.output)
}
