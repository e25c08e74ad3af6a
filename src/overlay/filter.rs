// SPDX-License-Identifier: GPL-3.0-only

//! Scan-area filtering of detections
//!
//! A detection is accepted only when its translated bounding box lies
//! strictly inside the cutout on all four sides. Touching an edge is not
//! enough, and partial overlap is rejected.

use super::{OverlayTransform, ScanRegion};
use crate::frame_processor::{AcceptedDetection, BoundingBox, DetectedRegion};
use tracing::trace;

/// Strict containment test of a translated box against the cutout
///
/// With no region configured, every box passes.
pub fn is_within_scan_area(bounding_box: &BoundingBox, region: Option<&ScanRegion>) -> bool {
    match region {
        Some(region) => {
            bounding_box.top > region.top()
                && bounding_box.left > region.left()
                && bounding_box.bottom < region.bottom()
                && bounding_box.right < region.right()
        }
        None => true,
    }
}

/// Translate and filter one frame's detections
///
/// Regions without a bounding box are always dropped. Accepted detections
/// keep their input order.
pub fn filter_detections(
    regions: Vec<DetectedRegion>,
    scan_region: Option<&ScanRegion>,
    transform: &OverlayTransform,
) -> Vec<AcceptedDetection> {
    regions
        .into_iter()
        .filter_map(|region| {
            let Some(source_box) = region.bounding_box else {
                trace!(payload = %region.payload, "Skipping detection without bounding box");
                return None;
            };

            let overlay_box = transform.translate_box(&source_box);
            if !is_within_scan_area(&overlay_box, scan_region) {
                trace!(
                    payload = %region.payload,
                    top = overlay_box.top,
                    left = overlay_box.left,
                    bottom = overlay_box.bottom,
                    right = overlay_box.right,
                    "Detection outside scan area"
                );
                return None;
            }

            Some(AcceptedDetection {
                region,
                overlay_box,
            })
        })
        .collect()
}
