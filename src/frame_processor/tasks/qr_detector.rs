// SPDX-License-Identifier: GPL-3.0-only

//! QR code detection task
//!
//! This module implements QR code detection using the rqrr crate.
//! Frames are sampled to greyscale (downscaled when large) and searched for
//! QR grids. Grid corners are scaled back to frame coordinates.

use super::BarcodeDetector;
use crate::constants::DEFAULT_DETECTOR_MAX_DIMENSION;
use crate::errors::DetectorError;
use crate::frame_processor::types::{BarcodeFormat, BoundingBox, DetectedRegion, Frame, Point};
use async_trait::async_trait;
use tracing::{debug, trace};

/// QR code detector
///
/// Optimized for real-time processing with frame downscaling.
pub struct QrDetector {
    /// Maximum dimension for processing (frames are downscaled to this)
    max_dimension: u32,
}

impl Default for QrDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl QrDetector {
    pub fn new() -> Self {
        Self {
            max_dimension: DEFAULT_DETECTOR_MAX_DIMENSION,
        }
    }

    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
        }
    }
}

#[async_trait]
impl BarcodeDetector for QrDetector {
    async fn detect(&self, frame: &Frame) -> Result<Vec<DetectedRegion>, DetectorError> {
        let max_dim = self.max_dimension;
        let frame = frame.clone();

        // Run detection in a blocking task to avoid blocking the async runtime
        tokio::task::spawn_blocking(move || detect_sync(&frame, max_dim))
            .await
            .map_err(|e| DetectorError::Engine(format!("QR detection task failed: {}", e)))
    }
}

/// Downscale factor so the larger side fits `max_dimension`
fn processing_scale(width: u32, height: u32, max_dimension: u32) -> f32 {
    if width > max_dimension || height > max_dimension {
        (width as f32 / max_dimension as f32).max(height as f32 / max_dimension as f32)
    } else {
        1.0
    }
}

/// Synchronous QR detection (runs in blocking task)
fn detect_sync(frame: &Frame, max_dimension: u32) -> Vec<DetectedRegion> {
    let start = std::time::Instant::now();

    let scale = processing_scale(frame.width, frame.height, max_dimension);
    let proc_width = ((frame.width as f32 / scale) as usize).max(1);
    let proc_height = ((frame.height as f32 / scale) as usize).max(1);
    let max_x = frame.width as usize - 1;
    let max_y = frame.height as usize - 1;

    // Nearest-neighbour sampling straight from the RGBA buffer
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(proc_width, proc_height, |x, y| {
            let src_x = ((x as f32 * scale) as usize).min(max_x);
            let src_y = ((y as f32 * scale) as usize).min(max_y);
            frame.luma(src_x, src_y)
        });

    let grids = prepared.detect_grids();
    trace!(
        proc_width,
        proc_height,
        scale,
        grids = grids.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "QR grid search complete"
    );

    let mut detections = Vec::with_capacity(grids.len());
    for grid in grids {
        let content = match grid.decode() {
            Ok((_meta, content)) => content,
            Err(e) => {
                debug!(error = ?e, "Failed to decode QR code");
                continue;
            }
        };

        let corners: Vec<Point> = grid
            .bounds
            .iter()
            .map(|p| Point::new(p.x as f32 * scale, p.y as f32 * scale))
            .collect();
        let bounding_box = BoundingBox::enclosing(corners.iter().copied());

        debug!(content = %content, bounds = ?bounding_box, "Detected QR code");

        detections.push(
            DetectedRegion::new(content, bounding_box)
                .with_format(BarcodeFormat::QrCode)
                .with_corner_points(corners),
        );
    }

    if !detections.is_empty() {
        debug!(
            count = detections.len(),
            total_ms = start.elapsed().as_millis(),
            "QR detection found codes"
        );
    }

    detections
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};
    use qrcode::{Color, QrCode};
    use std::sync::Arc;

    const MODULE_PX: u32 = 10;
    const QUIET_MODULES: u32 = 4;

    fn blank_frame(width: u32, height: u32) -> Frame {
        let data = vec![255u8; (width * height * 4) as usize];
        Frame::new(width, height, width * 4, Arc::from(data)).unwrap()
    }

    /// Render a QR code with a four-module quiet zone
    ///
    /// Returns the frame and the pixel span of the symbol on each axis.
    fn qr_frame(payload: &str) -> (Frame, f32, f32) {
        let code = QrCode::new(payload.as_bytes()).unwrap();
        let modules = code.width() as u32;
        let colors = code.to_colors();
        let size = (modules + 2 * QUIET_MODULES) * MODULE_PX;

        let img = RgbaImage::from_fn(size, size, |x, y| {
            let (mx, my) = (x / MODULE_PX, y / MODULE_PX);
            let inside = (QUIET_MODULES..QUIET_MODULES + modules).contains(&mx)
                && (QUIET_MODULES..QUIET_MODULES + modules).contains(&my);
            let dark = inside && {
                let idx = ((my - QUIET_MODULES) * modules + (mx - QUIET_MODULES)) as usize;
                matches!(colors[idx], Color::Dark)
            };
            if dark {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });

        let start = (QUIET_MODULES * MODULE_PX) as f32;
        let end = ((QUIET_MODULES + modules) * MODULE_PX) as f32;
        let frame = Frame::from_image(&DynamicImage::ImageRgba8(img)).unwrap();
        (frame, start, end)
    }

    fn assert_box_near(bounds: &BoundingBox, start: f32, end: f32, slack: f32) {
        for (name, near, far) in [
            ("left", bounds.left, bounds.right),
            ("top", bounds.top, bounds.bottom),
        ] {
            assert!((near - start).abs() <= slack, "{name} {near} vs {start}");
            // rqrr reports the far corners up to a module past the symbol
            assert!(
                far >= end - slack && far <= end + MODULE_PX as f32 + slack,
                "{name} far edge {far} vs {end}"
            );
        }
    }

    #[test]
    fn test_processing_scale() {
        assert_eq!(processing_scale(320, 240, 640), 1.0);
        assert_eq!(processing_scale(1280, 720, 640), 2.0);
        assert_eq!(processing_scale(720, 1920, 640), 3.0);
    }

    #[test]
    fn test_blank_frame_has_no_codes() {
        assert!(detect_sync(&blank_frame(64, 48), 640).is_empty());
        // Downscaled path
        assert!(detect_sync(&blank_frame(200, 100), 50).is_empty());
    }

    #[tokio::test]
    async fn test_async_detect_on_blank_frame() {
        let detector = QrDetector::with_max_dimension(32);
        let result = detector.detect(&blank_frame(64, 64)).await.unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_decodes_full_size_frame() {
        let (frame, start, end) = qr_frame("hello scanner");
        let found = detect_sync(&frame, 640);

        assert_eq!(found.len(), 1);
        let detection = &found[0];
        assert_eq!(detection.payload, "hello scanner");
        assert_eq!(detection.format, BarcodeFormat::QrCode);
        assert_eq!(detection.corner_points.len(), 4);
        let bounds = detection.bounding_box.expect("bounding box");
        assert_box_near(&bounds, start, end, 2.0);
    }

    #[tokio::test]
    async fn test_decodes_downscaled_frame_in_frame_coordinates() {
        let (frame, start, end) = qr_frame("hello scanner");
        assert!(frame.width > 100);

        let detector = QrDetector::with_max_dimension(100);
        let found = detector.detect(&frame).await.unwrap();

        assert_eq!(found.len(), 1);
        let detection = &found[0];
        assert_eq!(detection.payload, "hello scanner");
        assert_eq!(detection.format, BarcodeFormat::QrCode);
        // Corners are scaled back, so the box matches the full-size one
        // within the sampling error of one processing pixel
        let bounds = detection.bounding_box.expect("bounding box");
        assert_box_near(&bounds, start, end, 4.0);
    }
}
