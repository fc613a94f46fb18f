//! raster - command-line frontend for the image pipeline
//!
//! Single-operation commands plus a JSON script runner.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "raster")]
#[command(author, version, about = "Image pipeline CLI")]
#[command(long_about = "
Chainable image editing from the command line.

Examples:
  raster info photo.jpg                     # Show image info
  raster convert photo.jpg photo.png        # Convert formats
  raster resize photo.jpg -o small.jpg -w 320 -H 240
  raster resize photo.jpg -o small.jpg -w 320 -H 240 --fit
  raster vignette photo.jpg -o framed.png -e 2.0
  raster watermark photo.jpg logo.png -o out.jpg -p bottom-right
  raster script photo.jpg edits.json -o out.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert image format
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Run a JSON edit script
    #[command(visible_alias = "s")]
    Script(ScriptArgs),

    /// Resize or scale image
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Crop image
    Crop(CropArgs),

    /// Mirror image horizontally, vertically, or both
    Flip(FlipArgs),

    /// Rotate image by degrees
    Rotate(RotateArgs),

    /// Gaussian blur
    Blur(BlurArgs),

    /// Sharpen
    Sharpen(SharpenArgs),

    /// Vignette frame shading
    Vignette(VignetteArgs),

    /// Fisheye lens effect
    Fisheye(FisheyeArgs),

    /// Add uniform noise
    Noise(NoiseArgs),

    /// Binary black/white threshold
    #[command(name = "blackwhite", visible_alias = "bw")]
    BlackWhite(BlackWhiteArgs),

    /// Anaglyph 3D effect
    Anaglyph(AnaglyphArgs),

    /// Overlay a watermark image
    #[command(visible_alias = "wm")]
    Watermark(WatermarkArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input image
    input: PathBuf,

    /// Output image (format taken from extension)
    output: PathBuf,
}

#[derive(Args)]
struct ScriptArgs {
    /// Input image
    input: PathBuf,

    /// Script file (JSON command array)
    script: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Target width
    #[arg(short, long)]
    width: u32,

    /// Target height
    #[arg(short = 'H', long)]
    height: u32,

    /// Preserve aspect ratio, fitting within the target box
    #[arg(long)]
    fit: bool,
}

#[derive(Args)]
struct CropArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// X offset
    #[arg(short)]
    x: u32,

    /// Y offset
    #[arg(short)]
    y: u32,

    /// Width
    #[arg(short)]
    w: u32,

    /// Height
    #[arg(short = 'H')]
    h: u32,
}

#[derive(Args)]
struct FlipArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Direction: h, v, or b
    #[arg(short, long, default_value = "h")]
    direction: String,
}

#[derive(Args)]
struct RotateArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Rotation in degrees, -360 to 360 (counter-clockwise)
    #[arg(short, long)]
    angle: i32,
}

#[derive(Args)]
struct BlurArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Number of blur passes
    #[arg(short, long, default_value = "1")]
    passes: u32,
}

#[derive(Args)]
struct SharpenArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Number of sharpen passes
    #[arg(short, long, default_value = "1")]
    passes: u32,
}

#[derive(Args)]
struct VignetteArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Falloff exponent (higher = tighter bright center)
    #[arg(short, long, default_value = "1.0")]
    exponent: f64,
}

#[derive(Args)]
struct FisheyeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct NoiseArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Noise amplitude per channel (0-255)
    #[arg(short, long, default_value = "50")]
    level: u8,
}

#[derive(Args)]
struct BlackWhiteArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Threshold bias, -255 to 255
    #[arg(short, long, default_value = "0")]
    level: i32,
}

#[derive(Args)]
struct AnaglyphArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct WatermarkArgs {
    /// Input image
    input: PathBuf,

    /// Watermark image
    overlay: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Position: center, top-left, top-right, bottom-left, bottom-right
    #[arg(short, long, default_value = "center")]
    position: String,

    /// Opacity percent (0-100)
    #[arg(long, default_value = "100")]
    opacity: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Script(args) => commands::script::run(args, cli.verbose),
        Commands::Resize(args) => commands::resize::run(args, cli.verbose),
        Commands::Crop(args) => commands::crop::run(args, cli.verbose),
        Commands::Flip(args) => commands::transform::run_flip(args, cli.verbose),
        Commands::Rotate(args) => commands::transform::run_rotate(args, cli.verbose),
        Commands::Blur(args) => commands::filter::run_blur(args, cli.verbose),
        Commands::Sharpen(args) => commands::filter::run_sharpen(args, cli.verbose),
        Commands::Vignette(args) => commands::effects::run_vignette(args, cli.verbose),
        Commands::Fisheye(args) => commands::effects::run_fisheye(args, cli.verbose),
        Commands::Noise(args) => commands::effects::run_noise(args, cli.verbose),
        Commands::BlackWhite(args) => commands::effects::run_black_white(args, cli.verbose),
        Commands::Anaglyph(args) => commands::effects::run_anaglyph(args, cli.verbose),
        Commands::Watermark(args) => commands::watermark::run(args, cli.verbose),
    }
}
