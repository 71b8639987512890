//! StillZoom Core - Foundation types for artificial zoom video synthesis
//!
//! This crate provides the fundamental types used throughout StillZoom:
//! - Geometric primitives (Vec2, Resolution, CropRect)
//! - Frame buffers and pixel formats
//! - Frame rate representation
//! - Zoom progression planning (ZoomPlan, ZoomState)
//! - The frame sink seam (FrameSink)

pub mod error;
pub mod frame;
pub mod geometry;
pub mod sink;
pub mod time;
pub mod zoom;

pub use error::{Result, StillZoomError};
pub use frame::{FrameBuffer, PixelFormat};
pub use geometry::{CropRect, Resolution, Vec2};
pub use sink::FrameSink;
pub use time::FrameRate;
pub use zoom::{ZoomPlan, ZoomState};
