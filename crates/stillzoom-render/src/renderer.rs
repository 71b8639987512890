//! Per-frame crop extraction and rescaling.

use crate::marker::Crosshair;
use image::imageops::{self, FilterType};
use image::RgbImage;
use stillzoom_core::{CropRect, FrameBuffer, PixelFormat, Resolution, Result, StillZoomError, Vec2};

/// Renders output frames from a source image and a crop rectangle.
///
/// The extracted region is stretched to exactly the output resolution;
/// aspect ratio is not preserved. The crop rectangle already encodes the
/// framing, so letterboxing would double-apply it.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    output: Resolution,
    marker: Option<Crosshair>,
}

impl FrameRenderer {
    /// Create a renderer targeting the given output resolution.
    pub fn new(output: Resolution) -> Self {
        Self {
            output,
            marker: None,
        }
    }

    /// Enable the crosshair overlay at the COE, projected from the source
    /// image's full-frame resolution.
    pub fn with_center_marker(mut self, coe: Vec2, original: Resolution) -> Self {
        self.marker = Some(Crosshair::projected(coe, original, self.output));
        self
    }

    /// The configured output resolution.
    pub fn output_resolution(&self) -> Resolution {
        self.output
    }

    /// Render one output frame from the crop rectangle.
    ///
    /// The rectangle must be non-degenerate and lie inside the source
    /// image; a violation is a fatal geometry error, never padded over.
    pub fn render(&self, source: &FrameBuffer, rect: CropRect) -> Result<FrameBuffer> {
        let cropped = extract_crop(source, rect)?;
        let (crop_w, crop_h) = (cropped.width(), cropped.height());

        let crop_image = RgbImage::from_raw(crop_w, crop_h, cropped.into_raw()).ok_or_else(|| {
            StillZoomError::Geometry(format!("crop buffer does not match {crop_w}x{crop_h}"))
        })?;

        let mut scaled = imageops::resize(
            &crop_image,
            self.output.width,
            self.output.height,
            FilterType::Triangle,
        );

        if let Some(marker) = &self.marker {
            marker.draw(&mut scaled);
        }

        let (out_w, out_h) = (self.output.width, self.output.height);
        FrameBuffer::from_raw(out_w, out_h, PixelFormat::Rgb8, scaled.into_raw()).ok_or_else(
            || StillZoomError::Geometry(format!("scaled buffer does not match {out_w}x{out_h}")),
        )
    }
}

/// Copy the half-open sub-region `[left, right) × [top, bottom)` out of the
/// source frame.
fn extract_crop(source: &FrameBuffer, rect: CropRect) -> Result<FrameBuffer> {
    if source.format() != PixelFormat::Rgb8 {
        return Err(StillZoomError::InvalidParameter(
            "frame renderer requires an RGB8 source image".into(),
        ));
    }
    if !rect.fits_within(source.resolution()) {
        return Err(StillZoomError::Geometry(format!(
            "crop rect {rect} does not fit source image {}",
            source.resolution()
        )));
    }

    let bpp = source.format().bytes_per_pixel();
    let (width, height) = (rect.width() as u32, rect.height() as u32);
    let x_start = rect.left as usize * bpp;
    let x_end = rect.right as usize * bpp;

    let mut data = Vec::with_capacity(source.format().frame_size(width, height));
    for y in rect.top..rect.bottom {
        data.extend_from_slice(&source.row(y as u32)[x_start..x_end]);
    }

    FrameBuffer::from_raw(width, height, PixelFormat::Rgb8, data).ok_or_else(|| {
        StillZoomError::Geometry(format!("extracted crop does not match {width}x{height}"))
    })
}
