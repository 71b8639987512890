//! End-to-end runs of the streaming loop: plan → renderer → sink.

use stillzoom_core::{
    FrameBuffer, FrameRate, FrameSink, PixelFormat, Resolution, Result, Vec2, ZoomPlan,
};
use stillzoom_media::{SinkConfig, VideoCodec};
use stillzoom_render::{render_zoom_video, FrameRenderer};

// ── Helpers ────────────────────────────────────────────────────

/// Sink that keeps every frame for inspection.
#[derive(Default)]
struct CollectingSink {
    frames: Vec<FrameBuffer>,
    finished: bool,
}

impl FrameSink for CollectingSink {
    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<()> {
        assert!(!self.finished, "write after finish");
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// A source with enough structure that distinct crops produce distinct
/// frames: a diagonal gradient.
fn gradient_source(width: u32, height: u32) -> FrameBuffer {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width.max(1)) as u8);
            data.push((y * 255 / height.max(1)) as u8);
            data.push(((x + y) % 256) as u8);
        }
    }
    FrameBuffer::from_raw(width, height, PixelFormat::Rgb8, data).unwrap()
}

fn run(zoom_out: bool, draw_center: bool) -> CollectingSink {
    let source = gradient_source(384, 216);
    let output = Resolution::new(192, 108);
    let coe = Vec2::new(192.0, 108.0);
    let plan = ZoomPlan::new(4.0, 2.0, FrameRate::new(10, 1), zoom_out).unwrap();

    let mut renderer = FrameRenderer::new(output);
    if draw_center {
        renderer = renderer.with_center_marker(coe, source.resolution());
    }

    let mut sink = CollectingSink::default();
    let written = render_zoom_video(&source, coe, &plan, &renderer, &mut sink).unwrap();
    assert_eq!(written, sink.frames.len() as u64);
    assert!(sink.finished);
    sink
}

// ── Frame count and dimensions ─────────────────────────────────

#[test]
fn zoom_in_writes_total_frames() {
    assert_eq!(run(false, false).frames.len(), 20);
}

#[test]
fn zoom_out_writes_double() {
    assert_eq!(run(true, false).frames.len(), 40);
}

#[test]
fn single_frame_plan_still_renders() {
    let source = gradient_source(64, 64);
    let plan = ZoomPlan::new(2.5, 1.0, FrameRate::new(1, 1), false).unwrap();
    assert_eq!(plan.total_frames(), 1);
    let renderer = FrameRenderer::new(Resolution::new(32, 32));
    let mut sink = CollectingSink::default();
    let written =
        render_zoom_video(&source, Vec2::new(32.0, 32.0), &plan, &renderer, &mut sink).unwrap();
    assert_eq!(written, 1);
}

#[test]
fn every_frame_has_the_output_resolution() {
    let sink = run(true, false);
    let expected = Resolution::new(192, 108);
    assert!(sink.frames.iter().all(|f| f.resolution() == expected));
}

// ── Determinism and mirroring ──────────────────────────────────

#[test]
fn runs_are_reproducible() {
    let a = run(true, false);
    let b = run(true, false);
    assert_eq!(a.frames, b.frames);
}

#[test]
fn zoom_out_mirrors_the_forward_pass_exactly() {
    let sink = run(true, false);
    // Same index → same crop → byte-identical frame.
    assert_eq!(sink.frames[19], sink.frames[20]);
    assert_eq!(sink.frames[0], sink.frames[39]);
}

// ── Crosshair ──────────────────────────────────────────────────

#[test]
fn crosshair_center_is_identical_across_all_frames() {
    let sink = run(true, true);
    // COE (192, 108) in the 384x216 source projects to (96, 54) in the
    // 192x108 output, in every frame regardless of the crop.
    for frame in &sink.frames {
        assert_eq!(frame.pixel(96, 54), &[255, 0, 0]);
        assert_eq!(frame.pixel(96 - 10, 54), &[255, 0, 0]);
        assert_eq!(frame.pixel(96, 54 - 10), &[255, 0, 0]);
    }
}

#[test]
fn without_the_flag_no_marker_is_drawn() {
    let plain = run(false, false);
    // The gradient has no pure red anywhere near the projected center.
    assert_ne!(plain.frames[5].pixel(96, 54), &[255, 0, 0]);
}

// ── Sink configuration wiring ──────────────────────────────────

#[test]
fn sink_config_carries_the_run_parameters() {
    let frame_rate = FrameRate::from_fps_f64(10.0);
    let config = SinkConfig::new("clip.mp4", Resolution::new(192, 108), frame_rate)
        .with_codec(VideoCodec::H264)
        .with_crf(18);
    let args = config.ffmpeg_args();
    assert!(args.contains(&"192x108".to_string()));
    assert!(args.contains(&"10/1".to_string()));
    assert!(args.contains(&"libx264".to_string()));
}
