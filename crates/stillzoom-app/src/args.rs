//! Command-line arguments and value parsing.

use clap::Parser;
use std::path::PathBuf;
use stillzoom_core::{Resolution, Vec2};
use stillzoom_media::VideoCodec;

#[derive(Parser, Debug)]
#[command(
    name = "stillzoom",
    about = "Create an artificial zoom video from a single image",
    version
)]
pub struct Cli {
    /// The image to use
    pub image_file: PathBuf,

    /// Resolution of the generated output video, e.g. 960x540
    #[arg(value_parser = parse_resolution)]
    pub output_size: Resolution,

    /// Center of expansion in source-image pixel coordinates, e.g.
    /// --coe=978.76x486.45. With --offset it is interpreted as an offset
    /// from the physical image center (e.g. --coe=-10.74x5.89 --offset is
    /// 10.74 pixels left of and 5.89 pixels below the center).
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub coe: Vec2,

    /// Interpret --coe as an offset from the physical image center
    #[arg(long)]
    pub offset: bool,

    /// Frames per second of the generated output video
    #[arg(long, default_value = "30.0")]
    pub fps: f64,

    /// The amount to zoom in (must be > 1.0)
    #[arg(long, default_value = "6.0")]
    pub zoom_factor: f64,

    /// Length of the zoom-in in seconds. With the zoom-out pass enabled
    /// the total video is twice this long.
    #[arg(long, default_value = "5.0")]
    pub zoom_length: f64,

    /// Skip the zoom-out pass after zooming in
    #[arg(long)]
    pub no_zoom_out: bool,

    /// Draw a crosshair at the center of expansion
    #[arg(long)]
    pub draw_center: bool,

    /// Output file path (default: the input file's stem plus the codec's
    /// extension, in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Video codec: h264|h265|vp9
    #[arg(long, default_value = "h264", value_parser = parse_codec)]
    pub codec: VideoCodec,

    /// CRF quality value for the encoder (lower = better)
    #[arg(long)]
    pub crf: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Whether the mirrored zoom-out pass is enabled.
    pub fn zoom_out(&self) -> bool {
        !self.no_zoom_out
    }
}

/// Parse a `WIDTHxHEIGHT` resolution.
pub fn parse_resolution(input: &str) -> Result<Resolution, String> {
    let (w, h) = input
        .split_once('x')
        .ok_or_else(|| format!("invalid resolution format: {input:?} (expected WIDTHxHEIGHT)"))?;
    let width: u32 = w
        .parse()
        .map_err(|_| format!("invalid width: {w:?}"))?;
    let height: u32 = h
        .parse()
        .map_err(|_| format!("invalid height: {h:?}"))?;
    if width == 0 || height == 0 {
        return Err(format!("resolution components must be positive: {input}"));
    }
    Ok(Resolution::new(width, height))
}

/// Parse an `XxY` floating-point point.
pub fn parse_point(input: &str) -> Result<Vec2, String> {
    let (x, y) = input
        .split_once('x')
        .ok_or_else(|| format!("invalid point format: {input:?} (expected XxY)"))?;
    let x: f64 = x.parse().map_err(|_| format!("invalid x coordinate: {x:?}"))?;
    let y: f64 = y.parse().map_err(|_| format!("invalid y coordinate: {y:?}"))?;
    Ok(Vec2::new(x, y))
}

/// Parse a codec name.
pub fn parse_codec(input: &str) -> Result<VideoCodec, String> {
    match input.to_ascii_lowercase().as_str() {
        "h264" => Ok(VideoCodec::H264),
        "h265" => Ok(VideoCodec::H265),
        "vp9" => Ok(VideoCodec::Vp9),
        other => Err(format!("unknown codec: {other:?} (expected h264|h265|vp9)")),
    }
}

/// Resolve the configured COE against the source resolution, applying the
/// offset-from-center convention when requested.
pub fn resolve_coe(coe: Vec2, offset: bool, resolution: Resolution) -> Vec2 {
    if offset {
        resolution.as_vec2() / 2.0 + coe
    } else {
        coe
    }
}
