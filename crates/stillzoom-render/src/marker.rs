//! Center-of-expansion crosshair overlay.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use stillzoom_core::{Resolution, Vec2};

/// Arm length of the crosshair in pixels, each side of the center.
const ARM_LENGTH: i32 = 10;
/// Stroke width of both segments.
const STROKE: i32 = 2;
/// Marker color.
const COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// A crosshair pinned at the center of expansion, projected into output
/// space.
///
/// The projection uses the elementwise `output / original` scale of the
/// full frame, not the per-frame crop, so the marker lands on the same
/// output pixel in every frame of a run. The COE is the one point the
/// zoom keeps stationary, which makes the fixed marker a visual check of
/// the crop math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crosshair {
    center_x: i32,
    center_y: i32,
}

impl Crosshair {
    /// Project the COE from source-image coordinates into output
    /// coordinates.
    pub fn projected(coe: Vec2, original: Resolution, output: Resolution) -> Self {
        let scaled = coe * (output.as_vec2() / original.as_vec2());
        Self {
            center_x: scaled.x.round() as i32,
            center_y: scaled.y.round() as i32,
        }
    }

    /// The output-space center pixel.
    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    /// Draw the two segments onto a frame. Segments falling partly outside
    /// the frame are clipped.
    pub fn draw(&self, frame: &mut RgbImage) {
        let horizontal = Rect::at(self.center_x - ARM_LENGTH, self.center_y - STROKE / 2)
            .of_size((ARM_LENGTH * 2 + 1) as u32, STROKE as u32);
        let vertical = Rect::at(self.center_x - STROKE / 2, self.center_y - ARM_LENGTH)
            .of_size(STROKE as u32, (ARM_LENGTH * 2 + 1) as u32);
        draw_filled_rect_mut(frame, horizontal, COLOR);
        draw_filled_rect_mut(frame, vertical, COLOR);
    }
}
