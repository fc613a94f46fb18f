//! Resize/scale command.

use crate::ResizeArgs;
use anyhow::Result;

pub fn run(args: ResizeArgs, verbose: bool) -> Result<()> {
    let pipeline = super::open_pipeline(&args.input)?;
    let (src_w, src_h) = pipeline.buffer().dimensions();

    let pipeline = if args.fit {
        pipeline.scale(args.width, args.height)?
    } else {
        pipeline.resize(args.width, args.height)?
    };

    if verbose {
        let (out_w, out_h) = pipeline.buffer().dimensions();
        println!("Resized {src_w}x{src_h} -> {out_w}x{out_h}");
    }

    super::save_pipeline(pipeline, &args.output)
}
