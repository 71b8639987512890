//! Geometric primitives for crop planning.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D point/vector in source-image pixel coordinates.
pub type Vec2 = DVec2;

/// A pixel resolution (width, height). Both components must be > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Create a new resolution.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both dimensions as a float vector.
    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f64, self.height as f64)
    }

    /// Total pixel count.
    #[inline]
    pub fn pixel_count(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if a point lies within `[0, width] × [0, height]`.
    #[inline]
    pub fn contains(self, point: Vec2) -> bool {
        point.x >= 0.0
            && point.x <= self.width as f64
            && point.y >= 0.0
            && point.y <= self.height as f64
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned crop rectangle as pixel edge offsets into the source image.
///
/// Edges are half-open: the crop covers columns `[left, right)` and rows
/// `[top, bottom)`. Edges are signed so that a rectangle computed from an
/// out-of-bounds center of expansion stays representable; validity against
/// a source resolution is checked by the caller, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl CropRect {
    /// Create a rectangle from explicit edges.
    #[inline]
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The full-image rectangle for a source resolution.
    #[inline]
    pub fn full(resolution: Resolution) -> Self {
        Self::new(0, 0, resolution.width as i64, resolution.height as i64)
    }

    /// Compute the crop rectangle for a zoom factor around a center of
    /// expansion.
    ///
    /// `coe_complement` is `source_resolution − coe`, computed once per run.
    /// At factor 1.0 this degenerates to the full image (modulo rounding);
    /// growing factors shrink each edge toward the COE in proportion to the
    /// COE's distance from that edge, which keeps the COE at the same
    /// relative position inside every crop.
    pub fn around(coe: Vec2, coe_complement: Vec2, zoom_factor: f64) -> Self {
        Self {
            left: (coe.x - coe.x / zoom_factor).round() as i64,
            right: (coe.x + coe_complement.x / zoom_factor).round() as i64,
            top: (coe.y - coe.y / zoom_factor).round() as i64,
            bottom: (coe.y + coe_complement.y / zoom_factor).round() as i64,
        }
    }

    /// Width in pixels (negative if the rectangle is inverted).
    #[inline]
    pub fn width(self) -> i64 {
        self.right - self.left
    }

    /// Height in pixels (negative if the rectangle is inverted).
    #[inline]
    pub fn height(self) -> i64 {
        self.bottom - self.top
    }

    /// Whether the rectangle has zero or negative area.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Whether the rectangle is non-degenerate and lies fully inside the
    /// source resolution.
    pub fn fits_within(self, resolution: Resolution) -> bool {
        !self.is_degenerate()
            && self.left >= 0
            && self.top >= 0
            && self.right <= resolution.width as i64
            && self.bottom <= resolution.height as i64
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})x[{}, {})",
            self.left, self.right, self.top, self.bottom
        )
    }
}
