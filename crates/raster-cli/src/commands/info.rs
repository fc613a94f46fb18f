//! Image info command.

use crate::InfoArgs;
use anyhow::Result;
use std::fs;

pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let format = raster_io::detect_format(path)?;
        let pipeline = super::open_pipeline(path)?;
        let (width, height) = pipeline.buffer().dimensions();

        println!("{}: {} {}x{}", path.display(), format, width, height);
        if verbose {
            println!("  File size: {file_size} bytes");
            println!("  Pixels:    {}", pipeline.buffer().pixel_count());
            println!("  Alpha:     {}", format.supports_alpha());
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}
