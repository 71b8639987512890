//! StillZoom Render - frame production for artificial zoom videos
//!
//! This crate turns a source image and a [`ZoomPlan`] into a stream of
//! output frames:
//! - Crop extraction and rescaling ([`FrameRenderer`])
//! - Center-of-expansion crosshair overlay ([`Crosshair`])
//! - The streaming loop feeding a [`FrameSink`] ([`render_zoom_video`])
//!
//! [`ZoomPlan`]: stillzoom_core::ZoomPlan
//! [`FrameSink`]: stillzoom_core::FrameSink

pub mod marker;
pub mod pipeline;
pub mod renderer;

pub use marker::Crosshair;
pub use pipeline::render_zoom_video;
pub use renderer::FrameRenderer;
