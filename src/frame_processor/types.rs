// SPDX-License-Identifier: GPL-3.0-only

//! Core types for frame processing results
//!
//! These types represent what a detector reports for one frame and what
//! survives scan-area filtering. Payload data is carried through untouched.

use crate::errors::DetectorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// An axis-aligned rectangle given by its four edges
///
/// Used both in source-image coordinates (as reported by a detector) and in
/// overlay coordinates (after translation).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl BoundingBox {
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Smallest box enclosing all points
    ///
    /// Returns `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::new(p.y, p.x, p.y, p.x),
                Some(b) => Self::new(
                    b.top.min(p.y),
                    b.left.min(p.x),
                    b.bottom.max(p.y),
                    b.right.max(p.x),
                ),
            })
        })
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// A point in image or overlay coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Barcode symbology reported by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeFormat {
    #[default]
    Unknown,
    QrCode,
    Aztec,
    DataMatrix,
    Pdf417,
    Code128,
    Code39,
    Code93,
    Codabar,
    Ean13,
    Ean8,
    Itf,
    UpcA,
    UpcE,
}

/// One result yielded by a detector for a single frame
///
/// Everything except the bounding box is opaque pass-through data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectedRegion {
    /// Bounding box in source-image coordinates, if the detector produced one
    pub bounding_box: Option<BoundingBox>,
    /// Decoded display text
    pub payload: String,
    /// Raw decoded value when it differs from the display text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
    pub format: BarcodeFormat,
    /// Corner points in source-image coordinates
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub corner_points: Vec<Point>,
    /// Structured sub-fields (e.g. driver license `address_city`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl DetectedRegion {
    /// Create a detection with a payload and bounding box
    pub fn new(payload: impl Into<String>, bounding_box: Option<BoundingBox>) -> Self {
        Self {
            bounding_box,
            payload: payload.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: BarcodeFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_corner_points(mut self, corner_points: Vec<Point>) -> Self {
        self.corner_points = corner_points;
        self
    }

    pub fn with_fields(mut self, fields: BTreeMap<String, String>) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// A detection that passed scan-area filtering
///
/// This is what gets forwarded to the host and drawn on the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedDetection {
    #[serde(flatten)]
    pub region: DetectedRegion,
    /// Bounding box in overlay coordinates
    pub overlay_box: BoundingBox,
}

/// A camera frame in tightly or loosely packed RGBA8
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Bytes per row (at least `width * 4`)
    pub stride: u32,
    pub data: Arc<[u8]>,
}

impl Frame {
    /// Create a frame, checking the buffer is large enough
    pub fn new(
        width: u32,
        height: u32,
        stride: u32,
        data: Arc<[u8]>,
    ) -> Result<Self, DetectorError> {
        if width == 0 || height == 0 {
            return Err(DetectorError::InvalidFrame(format!(
                "zero-sized frame {}x{}",
                width, height
            )));
        }
        if (stride as usize) < width as usize * 4 {
            return Err(DetectorError::InvalidFrame(format!(
                "stride {} too small for width {}",
                stride, width
            )));
        }
        let required = stride as usize * (height as usize - 1) + width as usize * 4;
        if data.len() < required {
            return Err(DetectorError::InvalidFrame(format!(
                "buffer has {} bytes, need {}",
                data.len(),
                required
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Build a tightly packed frame from a decoded image
    pub fn from_image(image: &image::DynamicImage) -> Result<Self, DetectorError> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::new(width, height, width * 4, Arc::from(rgba.into_raw()))
    }

    /// Luma of the pixel at (x, y), Rec. 601 weights
    pub(crate) fn luma(&self, x: usize, y: usize) -> u8 {
        let offset = y * self.stride as usize + x * 4;
        match self.data.get(offset..offset + 3) {
            Some(px) => {
                ((px[0] as u32 * 299 + px[1] as u32 * 587 + px[2] as u32 * 114) / 1000) as u8
            }
            None => 0,
        }
    }
}
