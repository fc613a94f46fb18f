//! Watermark overlay command.

use crate::WatermarkArgs;
use anyhow::{bail, Result};
use raster_ops::Position;

pub fn run(args: WatermarkArgs, verbose: bool) -> Result<()> {
    let Some(position) = Position::parse(&args.position) else {
        bail!("unknown position {:?}", args.position);
    };

    let pipeline = super::open_pipeline(&args.input)?;
    if verbose {
        println!(
            "Overlaying {} on {} at {:?} ({}% opacity)",
            args.overlay.display(),
            args.input.display(),
            position,
            args.opacity
        );
    }

    let pipeline = pipeline.watermark_with_opacity(&args.overlay, position, args.opacity)?;
    super::save_pipeline(pipeline, &args.output)
}
