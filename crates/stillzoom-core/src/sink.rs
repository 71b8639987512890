//! The frame sink seam between rendering and encoding.

use crate::error::Result;
use crate::frame::FrameBuffer;

/// Ordered, append-only destination for rendered frames.
///
/// Frames arrive in strictly increasing render order; implementations must
/// not reorder or drop them, and must reject frames whose dimensions do
/// not match the stream they declared. [`finish`](FrameSink::finish)
/// flushes and closes the stream and is called exactly once after the
/// last frame.
pub trait FrameSink {
    /// Append one frame to the stream.
    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<()>;

    /// Flush and close the stream.
    fn finish(&mut self) -> Result<()>;
}
