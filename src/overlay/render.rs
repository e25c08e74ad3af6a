// SPDX-License-Identifier: GPL-3.0-only

//! Overlay rendering onto RGBA images
//!
//! The mask and viewfinder are rasterized with `tiny-skia` on a transparent
//! layer the size of the canvas, then composited over it. Detection boxes are
//! drawn with `imageproc` straight onto the canvas.

use super::ScanRegion;
use super::path::{mask_path, viewfinder_path};
use crate::constants::{DETECTION_STROKE_WIDTH, FRAME_STROKE_WIDTH, MARKER_COLOR, MASK_COLOR};
use crate::frame_processor::{AcceptedDetection, BoundingBox};
use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::{Blend, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use tiny_skia::{Paint, Pixmap, Stroke, Transform};
use tracing::{trace, warn};

/// Colours and stroke widths for the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub mask_color: Rgba<u8>,
    pub frame_color: Rgba<u8>,
    pub frame_stroke_width: f32,
    pub detection_color: Rgba<u8>,
    pub detection_stroke_width: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            mask_color: Rgba(MASK_COLOR),
            frame_color: Rgba(MARKER_COLOR),
            frame_stroke_width: FRAME_STROKE_WIDTH,
            detection_color: Rgba(MARKER_COLOR),
            detection_stroke_width: DETECTION_STROKE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    style: OverlayStyle,
}

impl OverlayRenderer {
    pub fn new(style: OverlayStyle) -> Self {
        Self { style }
    }

    /// Draw mask, viewfinder and detection boxes
    ///
    /// With no region only the detection boxes are drawn.
    pub fn render(
        &self,
        canvas: &mut RgbaImage,
        region: Option<&ScanRegion>,
        detections: &[AcceptedDetection],
    ) {
        if let Some(region) = region {
            if let Some(mut layer) = Pixmap::new(canvas.width(), canvas.height()) {
                self.fill_mask(&mut layer, region);
                self.stroke_viewfinder(&mut layer, region);
                composite(canvas, &layer);
            }
        }

        if !detections.is_empty() {
            let mut blended = Blend(std::mem::take(canvas));
            for detection in detections {
                draw_thick_rect(
                    &mut blended,
                    &detection.overlay_box,
                    self.style.detection_color,
                    self.style.detection_stroke_width,
                );
            }
            *canvas = blended.0;
        }

        trace!(
            has_region = region.is_some(),
            detections = detections.len(),
            "Rendered overlay"
        );
    }

    /// Dim everything outside the cutout
    pub fn draw_mask(&self, canvas: &mut RgbaImage, region: &ScanRegion) {
        if let Some(mut layer) = Pixmap::new(canvas.width(), canvas.height()) {
            self.fill_mask(&mut layer, region);
            composite(canvas, &layer);
        }
    }

    fn fill_mask(&self, layer: &mut Pixmap, region: &ScanRegion) {
        let Some(path) = mask_path(region).to_skia() else {
            warn!("Mask path is empty, skipping");
            return;
        };
        layer.fill_path(
            &path,
            &paint(self.style.mask_color),
            tiny_skia::FillRule::EvenOdd,
            Transform::identity(),
            None,
        );
    }

    fn stroke_viewfinder(&self, layer: &mut Pixmap, region: &ScanRegion) {
        let Some(path) = viewfinder_path(region).to_skia() else {
            return;
        };
        let stroke = Stroke {
            width: self.style.frame_stroke_width,
            ..Stroke::default()
        };
        layer.stroke_path(
            &path,
            &paint(self.style.frame_color),
            &stroke,
            Transform::identity(),
            None,
        );
    }
}

fn paint(color: Rgba<u8>) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
    paint.anti_alias = true;
    paint
}

/// Source-over composite of a premultiplied layer onto the canvas
fn composite(canvas: &mut RgbaImage, layer: &Pixmap) {
    let data: Vec<u8> = layer
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    match RgbaImage::from_raw(layer.width(), layer.height(), data) {
        Some(top) => imageops::overlay(canvas, &top, 0, 0),
        None => warn!("Overlay layer size does not match canvas"),
    }
}

/// Box outline as nested one-pixel rectangles centred on the box edges
fn draw_thick_rect(
    canvas: &mut Blend<RgbaImage>,
    bounds: &BoundingBox,
    color: Rgba<u8>,
    stroke_width: f32,
) {
    let thickness = stroke_width.round().max(1.0) as i32;
    let (x, y) = (bounds.left.round() as i32, bounds.top.round() as i32);
    let (w, h) = (bounds.width().round() as i32, bounds.height().round() as i32);

    let first = -(thickness / 2);
    for t in first..first + thickness {
        let (rw, rh) = (w + 2 * t, h + 2 * t);
        if rw < 1 || rh < 1 {
            continue;
        }
        let rect = Rect::at(x - t, y - t).of_size(rw as u32, rh as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}
