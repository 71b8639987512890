//! Frame rate representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame rate as a rational number (e.g., 30000/1001 for 29.97 fps).
///
/// Keeping the rational form lets the encoder receive an exact
/// `numerator/denominator` rate instead of a rounded float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (e.g., 30000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl FrameRate {
    /// Create a new frame rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Build a frame rate from a float fps value.
    ///
    /// Integral rates become `n/1`; fractional rates are carried at
    /// millihertz precision, which round-trips every rate a CLI float can
    /// usefully express.
    pub fn from_fps_f64(fps: f64) -> Self {
        if fps.fract() == 0.0 {
            Self::new(fps as u32, 1)
        } else {
            Self::new((fps * 1000.0).round() as u32, 1000)
        }
    }

    /// Convert to frames per second as f64.
    #[inline]
    pub fn to_fps_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whether the rate is positive and well-formed.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.numerator > 0 && self.denominator > 0
    }

    /// Common frame rates
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_30
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.to_fps_f64();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.3} fps", fps)
        }
    }
}
