// SPDX-License-Identifier: GPL-3.0-only

//! Scan Overlay - scan-area geometry and detection filtering for barcode scanners
//!
//! Barcode decoding itself is left to a detector; this crate decides which of
//! the detector's results lie inside the on-screen scan cutout, and draws the
//! cutout mask, viewfinder corners and detection boxes.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`overlay`]: Cutout geometry, coordinate translation, filtering and rendering
//! - [`frame_processor`]: Detector trait, QR detector and per-frame processing
//! - [`config`]: User configuration handling
//! - [`constants`]: Default geometry and styling
//! - [`errors`]: Error types
//!
//! # Example
//!
//! ```
//! use scan_overlay::frame_processor::{BoundingBox, DetectedRegion};
//! use scan_overlay::overlay::{OverlayTransform, ScanRegion, filter_detections};
//!
//! let region = ScanRegion::centered(1000.0, 1000.0);
//! let detections = vec![DetectedRegion::new(
//!     "https://example.com",
//!     Some(BoundingBox::new(400.0, 400.0, 600.0, 600.0)),
//! )];
//! let accepted = filter_detections(detections, Some(&region), &OverlayTransform::identity());
//! assert_eq!(accepted.len(), 1);
//! ```

pub mod config;
pub mod constants;
pub mod errors;
pub mod frame_processor;
pub mod overlay;

// Re-export commonly used types
pub use config::ScannerConfig;
pub use errors::{AppError, AppResult};
pub use frame_processor::{AcceptedDetection, BoundingBox, DetectedRegion};
pub use overlay::{OverlayTransform, ScanRegion, filter_detections, is_within_scan_area};
