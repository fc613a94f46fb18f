//! Effect commands: vignette, fisheye, noise, blackwhite, anaglyph.

use crate::{AnaglyphArgs, BlackWhiteArgs, FisheyeArgs, NoiseArgs, VignetteArgs};
use anyhow::Result;

pub fn run_vignette(args: VignetteArgs, verbose: bool) -> Result<()> {
    let pipeline = super::open_pipeline(&args.input)?;
    if verbose {
        println!(
            "Vignetting {} (exponent {})",
            args.input.display(),
            args.exponent
        );
    }

    let pipeline = pipeline.vignette(args.exponent)?;
    super::save_pipeline(pipeline, &args.output)
}

pub fn run_fisheye(args: FisheyeArgs, verbose: bool) -> Result<()> {
    let pipeline = super::open_pipeline(&args.input)?;
    let pipeline = pipeline.fisheye()?;

    if verbose {
        let (w, h) = pipeline.buffer().dimensions();
        println!("Fisheye canvas: {w}x{h}");
    }

    super::save_pipeline(pipeline, &args.output)
}

pub fn run_noise(args: NoiseArgs, verbose: bool) -> Result<()> {
    let pipeline = super::open_pipeline(&args.input)?;
    if verbose {
        println!("Adding noise to {} (level {})", args.input.display(), args.level);
    }

    let pipeline = pipeline.noise(args.level)?;
    super::save_pipeline(pipeline, &args.output)
}

pub fn run_black_white(args: BlackWhiteArgs, verbose: bool) -> Result<()> {
    let pipeline = super::open_pipeline(&args.input)?;
    if verbose {
        println!(
            "Thresholding {} (level {})",
            args.input.display(),
            args.level
        );
    }

    let pipeline = pipeline.black_white(args.level)?;
    super::save_pipeline(pipeline, &args.output)
}

pub fn run_anaglyph(args: AnaglyphArgs, verbose: bool) -> Result<()> {
    let pipeline = super::open_pipeline(&args.input)?;
    let pipeline = pipeline.anaglyph()?;

    if verbose {
        let (w, h) = pipeline.buffer().dimensions();
        println!("Anaglyph canvas: {w}x{h}");
    }

    super::save_pipeline(pipeline, &args.output)
}
