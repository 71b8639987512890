//! Zoom progression planning.
//!
//! A [`ZoomPlan`] maps frame indices to zoom factors along an exponential
//! ramp, and yields the full render sequence including the mirrored
//! zoom-out pass. The crop rectangle for a factor comes from
//! [`CropRect::around`](crate::geometry::CropRect::around).

use crate::error::{Result, StillZoomError};
use crate::time::FrameRate;
use serde::{Deserialize, Serialize};

/// The scalar zoom state for one frame: 1.0 = full image, higher = more
/// magnified (smaller crop).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    factor: f64,
}

impl ZoomState {
    /// No magnification: the crop covers the full image.
    pub const FULL: Self = Self { factor: 1.0 };

    /// Create a state with an explicit factor.
    #[inline]
    pub const fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// The magnification factor.
    #[inline]
    pub fn factor(self) -> f64 {
        self.factor
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::FULL
    }
}

/// The per-run zoom progression.
///
/// `total_frames = round(zoom_length_secs × fps)` and
/// `zoom_base = (zoom_factor_max − 1) ^ (1 / total_frames)`.
///
/// The exponential update trails the render by one frame: frame 0 renders
/// at the seed state and frame `i ≥ 1` renders at `zoom_base ^ (i − 1)`,
/// the value the update produced after frame `i − 1`. The zoom-out pass
/// replays the same index sequence in reverse through the same mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomPlan {
    total_frames: u64,
    zoom_base: f64,
    initial: ZoomState,
    zoom_out: bool,
}

impl ZoomPlan {
    /// Create a plan, validating the configuration.
    pub fn new(
        zoom_factor_max: f64,
        zoom_length_secs: f64,
        fps: FrameRate,
        zoom_out: bool,
    ) -> Result<Self> {
        if !fps.is_valid() {
            return Err(StillZoomError::InvalidParameter(format!(
                "frame rate must be positive, got {}/{}",
                fps.numerator, fps.denominator
            )));
        }
        if !(zoom_factor_max > 1.0) || !zoom_factor_max.is_finite() {
            return Err(StillZoomError::InvalidParameter(format!(
                "zoom factor must be > 1.0, got {zoom_factor_max}"
            )));
        }
        if !(zoom_length_secs > 0.0) || !zoom_length_secs.is_finite() {
            return Err(StillZoomError::InvalidParameter(format!(
                "zoom length must be positive, got {zoom_length_secs}s"
            )));
        }

        let total_frames = (zoom_length_secs * fps.to_fps_f64()).round() as u64;
        if total_frames == 0 {
            return Err(StillZoomError::InvalidParameter(format!(
                "zoom of {zoom_length_secs}s at {fps} resolves to zero frames"
            )));
        }

        Ok(Self {
            total_frames,
            zoom_base: (zoom_factor_max - 1.0).powf(1.0 / total_frames as f64),
            initial: ZoomState::FULL,
            zoom_out,
        })
    }

    /// Override the seed state frame 0 renders at.
    pub fn with_initial_state(mut self, initial: ZoomState) -> Self {
        self.initial = initial;
        self
    }

    /// Frames in one zoom direction.
    #[inline]
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frames the full render sequence emits (doubled when the zoom-out
    /// pass is enabled).
    #[inline]
    pub fn output_frames(&self) -> u64 {
        if self.zoom_out {
            self.total_frames * 2
        } else {
            self.total_frames
        }
    }

    /// The per-frame multiplicative base of the ramp.
    #[inline]
    pub fn zoom_base(&self) -> f64 {
        self.zoom_base
    }

    /// Whether the mirrored zoom-out pass is enabled.
    #[inline]
    pub fn zoom_out(&self) -> bool {
        self.zoom_out
    }

    /// The zoom factor frame `index` renders at.
    pub fn factor_for_frame(&self, index: u64) -> f64 {
        if index == 0 {
            self.initial.factor()
        } else {
            self.zoom_base.powf((index - 1) as f64)
        }
    }

    /// The frame-index sequence of the run: `[0, total_frames)` forward,
    /// then the same indices reversed when zooming back out.
    pub fn frame_indices(&self) -> impl Iterator<Item = u64> {
        let reverse = self.zoom_out.then(|| (0..self.total_frames).rev());
        (0..self.total_frames).chain(reverse.into_iter().flatten())
    }

    /// The full render sequence as `(frame_index, state)` pairs, in
    /// emission order.
    pub fn states(&self) -> impl Iterator<Item = (u64, ZoomState)> + '_ {
        self.frame_indices()
            .map(|i| (i, ZoomState::new(self.factor_for_frame(i))))
    }
}
