//! StillZoom Media - image and video I/O
//!
//! This crate handles the external collaborators of the zoom pipeline:
//! - Still-image loading and decoding
//! - The FFmpeg-backed video sink (raw frames piped to a child process)

pub mod loader;
pub mod sink;

pub use loader::load_still_image;
pub use sink::{SinkConfig, VideoCodec, VideoSink};
