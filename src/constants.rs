// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants
//!
//! Default geometry and styling for the scan overlay. All lengths are in
//! overlay pixels.

/// Width of the scan cutout
pub const DEFAULT_SCANNER_WIDTH: f32 = 500.0;

/// Height of the scan cutout
pub const DEFAULT_SCANNER_HEIGHT: f32 = 500.0;

/// Radius of the rounded cutout corners
pub const DEFAULT_CORNER_RADIUS: f32 = 20.0;

/// Length of each viewfinder corner leg, measured from the sharp corner
pub const DEFAULT_EDGE_LENGTH: f32 = 100.0;

/// Position of the cutout centre along the viewport width
///
/// 0.0 puts the centre on the left edge, 0.5 in the middle, 1.0 on the right edge.
pub const DEFAULT_HORIZONTAL_OFFSET: f32 = 0.5;

/// Position of the cutout centre along the viewport height
///
/// 0.0 puts the centre on the top edge, 0.5 in the middle, 1.0 on the bottom edge.
pub const DEFAULT_VERTICAL_OFFSET: f32 = 0.5;

/// Stroke width of the viewfinder corner accents
pub const FRAME_STROKE_WIDTH: f32 = 4.0;

/// Stroke width of detection boxes
pub const DETECTION_STROKE_WIDTH: f32 = 5.0;

/// Mask colour as RGBA (black at alpha 80/255)
pub const MASK_COLOR: [u8; 4] = [0, 0, 0, 80];

/// Viewfinder and detection box colour as RGBA
pub const MARKER_COLOR: [u8; 4] = [0, 255, 0, 255];

/// Maximum dimension frames are downscaled to before QR detection
pub const DEFAULT_DETECTOR_MAX_DIMENSION: u32 = 640;

/// Directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "scan-overlay";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";
