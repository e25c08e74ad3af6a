// SPDX-License-Identifier: GPL-3.0-only

//! Frame processor module
//!
//! Frames go to a detector, and the detector's regions are translated into
//! overlay space and filtered against the current scan region.

mod processor;
pub mod tasks;
pub mod types;

pub use processor::{
    FrameProcessor, ScanRegionPublisher, ScanRegionSnapshot, scan_region_channel,
};
pub use tasks::{BarcodeDetector, QrDetector};
pub use types::{AcceptedDetection, BarcodeFormat, BoundingBox, DetectedRegion, Frame, Point};
