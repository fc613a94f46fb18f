//! Script-facing operation registry.
//!
//! [`Operation`] is the closed set of commands a script may invoke, parsed
//! from a command name plus positional JSON parameters. Parsing is split
//! in two for the interpreter's skip semantics: an unknown command name
//! yields `Ok(None)` so callers can silently move on, while a known name
//! with malformed parameters is a hard [`PipelineError::Parameter`].
//!
//! The terminal commands (`render`, `write`) are deliberately absent: they
//! close the pipeline, and scripts always run start to finish over the
//! same buffer. A script naming them is treated like any other unknown
//! command.

use crate::{Pipeline, PipelineError, PipelineResult};
use raster_core::OutputFormat;
use raster_ops::{Flip, Kernel3, Position};
use serde_json::Value;

/// A single parsed script command, ready to apply to a [`Pipeline`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Horizontal/vertical/both mirror.
    Flip(Flip),
    /// Exact resize.
    Resize(u32, u32),
    /// Aspect-preserving fit.
    Scale(u32, u32),
    /// Rectangle crop: x, y, width, height.
    Crop(u32, u32, u32, u32),
    /// Rotation in degrees.
    Rotate(i32),
    /// Grayscale conversion.
    Greyscale,
    /// Brightness shift.
    Brightness(i32),
    /// Contrast shift.
    Contrast(i32),
    /// Per-channel color shift.
    Colorize(i32, i32, i32),
    /// Inversion.
    Negative,
    /// Sepia tone.
    Sepia,
    /// Emboss filter.
    Emboss,
    /// Sketch (mean removal) filter.
    Sketch,
    /// Block pixelation.
    Pixelate(u32),
    /// Smoothing with a center weight.
    Smooth(f32),
    /// Gaussian blur passes.
    Blur(u32),
    /// Sharpen passes.
    Sharpen(u32),
    /// Raw 3x3 convolution kernel.
    Convolution(Kernel3),
    /// Nearest-palette color replacement.
    Replace([u8; 3], [u8; 3]),
    /// Partial desaturation.
    Desaturate(u8),
    /// Vignette with an exponent.
    Vignette(f64),
    /// Fisheye remap.
    Fisheye,
    /// Uniform noise.
    Noise(u8),
    /// Binary threshold.
    BlackWhite(i32),
    /// Positioned overlay from a file.
    Watermark(String, Position),
    /// Full-canvas layer merge from a file.
    Layer(String, u8),
    /// Anaglyph compositing.
    Anaglyph,
    /// Output-format retag.
    Convert(OutputFormat),
}

impl Operation {
    /// Parses a command name and positional parameters.
    ///
    /// Returns `Ok(None)` for names outside the registry. Known names with
    /// the wrong arity or parameter types are an error.
    pub fn parse(name: &str, params: &[Value]) -> PipelineResult<Option<Self>> {
        let op = match name {
            "flip" => {
                let dir = str_param(name, params, 0)?;
                let dir = Flip::parse(&dir)
                    .ok_or_else(|| bad(name, "direction must be \"h\", \"v\", or \"b\""))?;
                Self::Flip(dir)
            }
            "resize" => Self::Resize(u32_param(name, params, 0)?, u32_param(name, params, 1)?),
            "scale" => Self::Scale(u32_param(name, params, 0)?, u32_param(name, params, 1)?),
            "crop" => Self::Crop(
                u32_param(name, params, 0)?,
                u32_param(name, params, 1)?,
                u32_param(name, params, 2)?,
                u32_param(name, params, 3)?,
            ),
            "rotate" => Self::Rotate(i32_param(name, params, 0)?),
            "greyscale" => Self::Greyscale,
            "brightness" => Self::Brightness(i32_param(name, params, 0)?),
            "contrast" => Self::Contrast(i32_param(name, params, 0)?),
            "colorize" => Self::Colorize(
                i32_param(name, params, 0)?,
                i32_param(name, params, 1)?,
                i32_param(name, params, 2)?,
            ),
            "negative" => Self::Negative,
            "sepia" => Self::Sepia,
            "emboss" => Self::Emboss,
            "sketch" => Self::Sketch,
            "pixelate" => Self::Pixelate(u32_param(name, params, 0)?),
            "smooth" => Self::Smooth(f64_param(name, params, 0)? as f32),
            "blur" => Self::Blur(u32_param(name, params, 0)?),
            "sharpen" => Self::Sharpen(u32_param(name, params, 0)?),
            "convolution" => {
                let weights = [
                    row_param(name, params, 0)?,
                    row_param(name, params, 1)?,
                    row_param(name, params, 2)?,
                ];
                Self::Convolution(Kernel3::new(weights, 1.0, 127.0)?)
            }
            "replace" => {
                // Two [r,g,b] arrays, or six positional channel integers
                // (the legacy form older scripts use).
                if params.len() == 6 {
                    let mut ch = [0u8; 6];
                    for (i, slot) in ch.iter_mut().enumerate() {
                        *slot = u8_param(name, params, i)?;
                    }
                    Self::Replace([ch[0], ch[1], ch[2]], [ch[3], ch[4], ch[5]])
                } else {
                    Self::Replace(rgb_param(name, params, 0)?, rgb_param(name, params, 1)?)
                }
            }
            "desaturate" => Self::Desaturate(u8_param(name, params, 0)?),
            "vignette" => {
                // the exponent parameter is optional
                let exponent = match params.first() {
                    Some(v) => as_f64(name, 0, v)?,
                    None => raster_ops::vignette::DEFAULT_EXPONENT,
                };
                Self::Vignette(exponent)
            }
            "fisheye" => Self::Fisheye,
            "noise" => Self::Noise(u8_param(name, params, 0)?),
            "blackwhite" => Self::BlackWhite(i32_param(name, params, 0)?),
            "watermark" => {
                let path = str_param(name, params, 0)?;
                let pos = match params.get(1) {
                    Some(v) => {
                        let s = as_str(name, 1, v)?;
                        Position::parse(&s)
                            .ok_or_else(|| bad(name, "unknown overlay position"))?
                    }
                    None => Position::Center,
                };
                Self::Watermark(path, pos)
            }
            "layer" => {
                let path = str_param(name, params, 0)?;
                let opacity = match params.get(1) {
                    Some(v) => as_u64(name, 1, v)?
                        .try_into()
                        .map_err(|_| bad(name, "opacity must fit in 0..=255"))?,
                    None => 100,
                };
                Self::Layer(path, opacity)
            }
            "anaglyph" => Self::Anaglyph,
            "convert" => {
                let s = str_param(name, params, 0)?;
                let format = OutputFormat::parse(&s)
                    .ok_or_else(|| bad(name, "unknown output format"))?;
                Self::Convert(format)
            }
            _ => return Ok(None),
        };
        Ok(Some(op))
    }

    /// Applies this operation to a pipeline, returning the updated one.
    pub fn apply(self, pipeline: Pipeline) -> PipelineResult<Pipeline> {
        match self {
            Self::Flip(dir) => pipeline.flip(dir),
            Self::Resize(w, h) => pipeline.resize(w, h),
            Self::Scale(w, h) => pipeline.scale(w, h),
            Self::Crop(x, y, w, h) => pipeline.crop(x, y, w, h),
            Self::Rotate(deg) => pipeline.rotate(deg),
            Self::Greyscale => pipeline.greyscale(),
            Self::Brightness(level) => pipeline.brightness(level),
            Self::Contrast(level) => pipeline.contrast(level),
            Self::Colorize(r, g, b) => pipeline.colorize(r, g, b),
            Self::Negative => pipeline.negative(),
            Self::Sepia => pipeline.sepia(),
            Self::Emboss => pipeline.emboss(),
            Self::Sketch => pipeline.sketch(),
            Self::Pixelate(size) => pipeline.pixelate(size),
            Self::Smooth(level) => pipeline.smooth(level),
            Self::Blur(passes) => pipeline.blur(passes),
            Self::Sharpen(passes) => pipeline.sharpen(passes),
            Self::Convolution(kernel) => pipeline.convolution(kernel),
            Self::Replace(target, replacement) => pipeline.replace(target, replacement),
            Self::Desaturate(level) => pipeline.desaturate(level),
            Self::Vignette(exponent) => pipeline.vignette(exponent),
            Self::Fisheye => pipeline.fisheye(),
            Self::Noise(level) => pipeline.noise(level),
            Self::BlackWhite(level) => pipeline.black_white(level),
            Self::Watermark(path, pos) => pipeline.watermark(path, pos),
            Self::Layer(path, opacity) => pipeline.layer(path, opacity),
            Self::Anaglyph => pipeline.anaglyph(),
            Self::Convert(format) => Ok(pipeline.convert(format)),
        }
    }
}

fn bad(name: &str, what: &str) -> PipelineError {
    PipelineError::Parameter(format!("{name}: {what}"))
}

fn param<'a>(name: &str, params: &'a [Value], index: usize) -> PipelineResult<&'a Value> {
    params
        .get(index)
        .ok_or_else(|| bad(name, &format!("missing parameter {index}")))
}

fn as_f64(name: &str, index: usize, value: &Value) -> PipelineResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| bad(name, &format!("parameter {index} must be a number")))
}

fn as_i64(name: &str, index: usize, value: &Value) -> PipelineResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| bad(name, &format!("parameter {index} must be an integer")))
}

fn as_u64(name: &str, index: usize, value: &Value) -> PipelineResult<u64> {
    value
        .as_u64()
        .ok_or_else(|| bad(name, &format!("parameter {index} must be a non-negative integer")))
}

fn as_str(name: &str, index: usize, value: &Value) -> PipelineResult<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| bad(name, &format!("parameter {index} must be a string")))
}

fn f64_param(name: &str, params: &[Value], index: usize) -> PipelineResult<f64> {
    as_f64(name, index, param(name, params, index)?)
}

fn i32_param(name: &str, params: &[Value], index: usize) -> PipelineResult<i32> {
    as_i64(name, index, param(name, params, index)?)?
        .try_into()
        .map_err(|_| bad(name, &format!("parameter {index} out of i32 range")))
}

fn u32_param(name: &str, params: &[Value], index: usize) -> PipelineResult<u32> {
    as_u64(name, index, param(name, params, index)?)?
        .try_into()
        .map_err(|_| bad(name, &format!("parameter {index} out of u32 range")))
}

fn u8_param(name: &str, params: &[Value], index: usize) -> PipelineResult<u8> {
    as_u64(name, index, param(name, params, index)?)?
        .try_into()
        .map_err(|_| bad(name, &format!("parameter {index} out of u8 range")))
}

fn str_param(name: &str, params: &[Value], index: usize) -> PipelineResult<String> {
    as_str(name, index, param(name, params, index)?)
}

/// Extracts a three-element JSON array of numbers as a kernel row.
fn row_param(name: &str, params: &[Value], index: usize) -> PipelineResult<[f32; 3]> {
    let row = param(name, params, index)?
        .as_array()
        .ok_or_else(|| bad(name, &format!("parameter {index} must be an array")))?;
    if row.len() != 3 {
        return Err(bad(name, &format!("parameter {index} must have 3 elements")));
    }
    let mut out = [0.0f32; 3];
    for (i, v) in row.iter().enumerate() {
        out[i] = as_f64(name, index, v)? as f32;
    }
    Ok(out)
}

/// Extracts a three-element JSON array as an RGB triple.
fn rgb_param(name: &str, params: &[Value], index: usize) -> PipelineResult<[u8; 3]> {
    let rgb = param(name, params, index)?
        .as_array()
        .ok_or_else(|| bad(name, &format!("parameter {index} must be an array")))?;
    if rgb.len() != 3 {
        return Err(bad(name, &format!("parameter {index} must have 3 elements")));
    }
    let mut out = [0u8; 3];
    for (i, v) in rgb.iter().enumerate() {
        out[i] = as_u64(name, index, v)?
            .try_into()
            .map_err(|_| bad(name, &format!("parameter {index} channels must fit in 0..=255")))?;
    }
    Ok(out)
}
