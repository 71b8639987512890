//! StillZoom - artificial zoom video synthesis from a single image.
//!
//! Entry point: parses the command line, loads and validates the inputs,
//! then runs the streaming loop against an FFmpeg sink.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use stillzoom_core::{FrameRate, ZoomPlan};
use stillzoom_media::{load_still_image, SinkConfig, VideoSink};
use stillzoom_render::{render_zoom_video, FrameRenderer};
use tracing::info;

mod args;

use args::{resolve_coe, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = load_still_image(&cli.image_file)?;
    let original_resolution = source.resolution();

    // Everything below must be validated before the sink opens, so a bad
    // configuration never leaves a partial output file behind.
    let coe = resolve_coe(cli.coe, cli.offset, original_resolution);
    if !original_resolution.contains(coe) {
        bail!(
            "center of expansion ({:.2}, {:.2}) lies outside the {} image",
            coe.x,
            coe.y,
            original_resolution
        );
    }

    if !(cli.fps > 0.0) {
        bail!("--fps must be positive, got {}", cli.fps);
    }
    let frame_rate = FrameRate::from_fps_f64(cli.fps);
    let plan = ZoomPlan::new(cli.zoom_factor, cli.zoom_length, frame_rate, cli.zoom_out())?;

    let coe_scaled = coe * (cli.output_size.as_vec2() / original_resolution.as_vec2());
    info!(
        "Using center of expansion: ({:.2}, {:.2}) at full resolution, ({:.2}, {:.2}) at output resolution",
        coe.x, coe.y, coe_scaled.x, coe_scaled.y
    );

    if !VideoSink::is_available() {
        bail!("ffmpeg was not found on PATH; it is required for encoding");
    }

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli));

    let mut config = SinkConfig::new(output_path, cli.output_size, frame_rate)
        .with_codec(cli.codec);
    if let Some(crf) = cli.crf {
        config = config.with_crf(crf);
    }
    let mut sink = VideoSink::open(config).context("failed to open the video sink")?;

    let mut renderer = FrameRenderer::new(cli.output_size);
    if cli.draw_center {
        renderer = renderer.with_center_marker(coe, original_resolution);
    }

    let written = render_zoom_video(&source, coe, &plan, &renderer, &mut sink)?;
    info!(frames = written, "Done");
    Ok(())
}

/// Derive the default output path from the input file's stem:
/// `photo.jpg` becomes `photo.mp4` in the current directory.
fn default_output_path(cli: &Cli) -> PathBuf {
    let stem = cli
        .image_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "zoom".to_string());
    PathBuf::from(format!("{stem}.{}", cli.codec.extension()))
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
