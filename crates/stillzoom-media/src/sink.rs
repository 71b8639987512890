//! FFmpeg-backed video sink.
//!
//! Frames are piped as packed rawvideo into a spawned `ffmpeg` process,
//! which encodes and muxes the container file. The sink owns the child
//! process for its whole lifetime and reaps it on every exit path.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use stillzoom_core::{FrameBuffer, FrameRate, FrameSink, PixelFormat, Resolution, Result, StillZoomError};
use tracing::{debug, info, warn};

// ── Codec selection ─────────────────────────────────────────────

/// Video codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VideoCodec {
    #[default]
    H264,
    H265,
    Vp9,
}

impl VideoCodec {
    /// FFmpeg encoder name.
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            Self::H264 => "libx264",
            Self::H265 => "libx265",
            Self::Vp9 => "libvpx-vp9",
        }
    }

    /// File extension for this codec's container.
    pub fn extension(self) -> &'static str {
        match self {
            Self::H264 | Self::H265 => "mp4",
            Self::Vp9 => "webm",
        }
    }
}

// ── Sink configuration ──────────────────────────────────────────

/// Configuration for one output stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Output file path.
    pub path: PathBuf,
    /// Output resolution; every written frame must match it.
    pub resolution: Resolution,
    /// Container frame rate.
    pub frame_rate: FrameRate,
    /// Video codec.
    pub codec: VideoCodec,
    /// Pixel layout of the incoming raw frames.
    pub pixel_format: PixelFormat,
    /// CRF quality value (lower = better), if the codec takes one.
    pub crf: Option<u32>,
}

impl SinkConfig {
    /// Create a config with the default codec and quality.
    pub fn new(path: impl Into<PathBuf>, resolution: Resolution, frame_rate: FrameRate) -> Self {
        Self {
            path: path.into(),
            resolution,
            frame_rate,
            codec: VideoCodec::default(),
            pixel_format: PixelFormat::Rgb8,
            crf: None,
        }
    }

    /// Set the codec.
    pub fn with_codec(mut self, codec: VideoCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Set the CRF quality value.
    pub fn with_crf(mut self, crf: u32) -> Self {
        self.crf = Some(crf);
        self
    }

    /// Build the FFmpeg command arguments.
    pub fn ffmpeg_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        // Input from pipe (raw frames)
        args.extend_from_slice(&[
            "-y".into(),
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-f".into(),
            "rawvideo".into(),
            "-pixel_format".into(),
            self.pixel_format.ffmpeg_name().into(),
            "-video_size".into(),
            format!("{}x{}", self.resolution.width, self.resolution.height),
            "-framerate".into(),
            format!(
                "{}/{}",
                self.frame_rate.numerator, self.frame_rate.denominator
            ),
            "-i".into(),
            "pipe:0".into(),
        ]);

        // Video codec
        args.extend_from_slice(&["-c:v".into(), self.codec.ffmpeg_encoder().into()]);
        if let Some(crf) = self.crf {
            args.extend_from_slice(&["-crf".into(), crf.to_string()]);
        }

        // Pixel format for output
        args.extend_from_slice(&["-pix_fmt".into(), "yuv420p".into()]);

        // Output
        args.push(self.path.to_string_lossy().into_owned());

        args
    }
}

// ── The sink ────────────────────────────────────────────────────

/// A video sink writing through a spawned `ffmpeg` process.
pub struct VideoSink {
    config: SinkConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    frames_written: u64,
}

impl VideoSink {
    /// Check whether `ffmpeg` is reachable on PATH.
    pub fn is_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Validate the configuration and spawn the encoder process.
    pub fn open(config: SinkConfig) -> Result<Self> {
        if config.resolution.width == 0 || config.resolution.height == 0 {
            return Err(StillZoomError::InvalidParameter(format!(
                "output resolution must be positive, got {}",
                config.resolution
            )));
        }
        if !config.frame_rate.is_valid() {
            return Err(StillZoomError::InvalidParameter(format!(
                "frame rate must be positive, got {}/{}",
                config.frame_rate.numerator, config.frame_rate.denominator
            )));
        }

        let args = config.ffmpeg_args();
        debug!(?args, "Spawning ffmpeg");

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StillZoomError::Encoder(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| StillZoomError::Encoder("failed to open ffmpeg stdin".into()))?;

        info!(
            output = %config.path.display(),
            resolution = %config.resolution,
            rate = %config.frame_rate,
            encoder = config.codec.ffmpeg_encoder(),
            "Opened video sink"
        );

        Ok(Self {
            config,
            child: Some(child),
            stdin: Some(stdin),
            frames_written: 0,
        })
    }

    /// Number of frames accepted so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl FrameSink for VideoSink {
    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<()> {
        if frame.resolution() != self.config.resolution
            || frame.format() != self.config.pixel_format
        {
            return Err(StillZoomError::Encoder(format!(
                "frame {} ({:?}) does not match the declared stream {} ({:?})",
                frame.resolution(),
                frame.format(),
                self.config.resolution,
                self.config.pixel_format
            )));
        }

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| StillZoomError::Encoder("video sink is already closed".into()))?;

        use std::io::Write;
        stdin.write_all(frame.as_bytes()).map_err(|e| {
            StillZoomError::Encoder(format!(
                "failed to write frame {}: {e}",
                self.frames_written
            ))
        })?;

        self.frames_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        // Close stdin to signal end-of-stream
        drop(self.stdin.take());

        let child = self
            .child
            .take()
            .ok_or_else(|| StillZoomError::Encoder("video sink is already closed".into()))?;

        let output = child
            .wait_with_output()
            .map_err(|e| StillZoomError::Encoder(format!("failed to wait for ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StillZoomError::Encoder(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        info!(
            frames = self.frames_written,
            output = %self.config.path.display(),
            "Closed video sink"
        );
        Ok(())
    }
}

impl Drop for VideoSink {
    fn drop(&mut self) {
        // Reap the encoder if the stream was abandoned mid-run, so an
        // aborted export does not leak the process or its file handle.
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            warn!(
                output = %self.config.path.display(),
                frames = self.frames_written,
                "Video sink dropped before finish; terminating encoder"
            );
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SinkConfig {
        SinkConfig::new(
            "/tmp/out.mp4",
            Resolution::new(960, 540),
            FrameRate::new(30, 1),
        )
    }

    #[test]
    fn codec_mapping() {
        assert_eq!(VideoCodec::H264.ffmpeg_encoder(), "libx264");
        assert_eq!(VideoCodec::H264.extension(), "mp4");
        assert_eq!(VideoCodec::H265.ffmpeg_encoder(), "libx265");
        assert_eq!(VideoCodec::Vp9.extension(), "webm");
    }

    #[test]
    fn ffmpeg_args_describe_the_raw_stream() {
        let args = config().with_codec(VideoCodec::H264).with_crf(18).ffmpeg_args();
        assert!(args.contains(&"rawvideo".to_string()));
        assert!(args.contains(&"rgb24".to_string()));
        assert!(args.contains(&"960x540".to_string()));
        assert!(args.contains(&"30/1".to_string()));
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"-crf".to_string()));
        assert!(args.contains(&"yuv420p".to_string()));
        assert_eq!(args.last().unwrap(), "/tmp/out.mp4");
    }

    #[test]
    fn args_omit_crf_when_unset() {
        let args = config().ffmpeg_args();
        assert!(!args.contains(&"-crf".to_string()));
    }

    #[test]
    fn fractional_rate_is_rational_in_args() {
        let mut cfg = config();
        cfg.frame_rate = FrameRate::from_fps_f64(23.976);
        assert!(cfg.ffmpeg_args().contains(&"23976/1000".to_string()));
    }

    #[test]
    fn write_rejects_dimension_mismatch() {
        let mut sink = VideoSink {
            config: config(),
            child: None,
            stdin: None,
            frames_written: 0,
        };
        let frame = FrameBuffer::new(100, 100, PixelFormat::Rgb8);
        let err = sink.write_frame(&frame).unwrap_err();
        assert!(matches!(err, StillZoomError::Encoder(_)));
    }

    #[test]
    fn write_after_close_fails() {
        let mut sink = VideoSink {
            config: config(),
            child: None,
            stdin: None,
            frames_written: 0,
        };
        let frame = FrameBuffer::new(960, 540, PixelFormat::Rgb8);
        let err = sink.write_frame(&frame).unwrap_err();
        assert!(matches!(err, StillZoomError::Encoder(_)));
    }
}
