// SPDX-License-Identifier: GPL-3.0-only

//! Scan overlay module
//!
//! This module owns everything between the detector output and the screen:
//!
//! - The scan cutout geometry ([`ScanRegion`])
//! - Source-image to overlay coordinate translation ([`OverlayTransform`])
//! - Scan-area filtering of detections ([`filter_detections`])
//! - Vector paths for the mask and viewfinder, and a renderer for them
//!
//! # Coordinate System
//!
//! Detectors report boxes in source-image pixels. The overlay works in view
//! pixels with the origin at the top left. Boxes are translated every frame
//! and never cached.

mod filter;
pub mod path;
mod render;
mod scan_region;
mod transform;

pub use filter::{filter_detections, is_within_scan_area};
pub use path::{FillRule, Path, PathCommand, cutout_path, mask_path, viewfinder_path};
pub use render::{OverlayRenderer, OverlayStyle};
pub use scan_region::ScanRegion;
pub use transform::OverlayTransform;
