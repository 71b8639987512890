//! The zoom streaming loop: plan → render → sink.

use crate::renderer::FrameRenderer;
use stillzoom_core::{CropRect, FrameBuffer, FrameSink, Result, StillZoomError, Vec2, ZoomPlan};
use tracing::{debug, info};

/// How often the streaming loop reports progress.
const PROGRESS_INTERVAL: u64 = 30;

/// Run the full zoom synthesis: iterate the plan's frame sequence, render
/// each crop, and append it to the sink.
///
/// The COE's complement against the source resolution is computed once,
/// before the loop. Preconditions (COE inside the image, starting factor
/// at least 1.0) are checked here, at the orchestration boundary; the
/// crop math itself does not guard. Any failure aborts the run, and the
/// sink's own cleanup is responsible for not leaking encoder state on
/// that path.
///
/// Returns the number of frames written.
pub fn render_zoom_video(
    source: &FrameBuffer,
    coe: Vec2,
    plan: &ZoomPlan,
    renderer: &FrameRenderer,
    sink: &mut dyn FrameSink,
) -> Result<u64> {
    let resolution = source.resolution();
    if !resolution.contains(coe) {
        return Err(StillZoomError::InvalidParameter(format!(
            "center of expansion ({:.2}, {:.2}) lies outside the {} source image",
            coe.x, coe.y, resolution
        )));
    }
    if plan.factor_for_frame(0) < 1.0 {
        return Err(StillZoomError::InvalidParameter(format!(
            "initial zoom factor must be >= 1.0, got {}",
            plan.factor_for_frame(0)
        )));
    }

    let coe_complement = resolution.as_vec2() - coe;
    let total = plan.output_frames();
    info!(
        frames = total,
        output = %renderer.output_resolution(),
        zoom_base = plan.zoom_base(),
        "Starting zoom synthesis"
    );

    let mut written = 0u64;
    for (index, state) in plan.states() {
        let rect = CropRect::around(coe, coe_complement, state.factor());
        if !rect.fits_within(resolution) {
            return Err(StillZoomError::Geometry(format!(
                "crop rect {rect} for frame {index} (factor {:.4}) degenerated",
                state.factor()
            )));
        }

        let frame = renderer.render(source, rect)?;
        sink.write_frame(&frame)?;
        written += 1;

        if written % PROGRESS_INTERVAL == 0 {
            debug!(written, total, factor = state.factor(), "Rendered frame batch");
        }
    }

    sink.finish()?;
    info!(written, "Zoom synthesis finished");
    Ok(written)
}
