//! Still-image loading and decoding.

use std::path::Path;
use stillzoom_core::{FrameBuffer, PixelFormat, Result, StillZoomError};
use tracing::info;

/// Load and decode a still image into a packed RGB8 frame buffer.
///
/// Any container format the `image` crate understands is accepted; the
/// decoded pixels are converted to RGB8, the pipeline's working format.
pub fn load_still_image<P: AsRef<Path>>(path: P) -> Result<FrameBuffer> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StillZoomError::NotFound(format!(
            "image file not found: {}",
            path.display()
        )));
    }

    let decoded = image::open(path)
        .map_err(|e| StillZoomError::Decoder(format!("failed to decode {}: {e}", path.display())))?
        .into_rgb8();
    let (width, height) = decoded.dimensions();

    info!(path = %path.display(), width, height, "Loaded source image");

    FrameBuffer::from_raw(width, height, PixelFormat::Rgb8, decoded.into_raw()).ok_or_else(|| {
        StillZoomError::Decoder(format!(
            "decoded buffer does not match reported {width}x{height}"
        ))
    })
}
