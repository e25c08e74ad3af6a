// SPDX-License-Identifier: GPL-3.0-only

//! Scan cutout geometry
//!
//! A [`ScanRegion`] is an immutable value. When the viewport changes size a
//! new region is computed with [`ScanRegion::resized`] and published in place
//! of the old one, so readers never observe a partially updated rectangle.
//!
//! The edges are private and only ever come out of [`ScanRegion::compute`],
//! so they always agree with the stored scanner size, offsets and viewport.

use crate::constants::{
    DEFAULT_CORNER_RADIUS, DEFAULT_EDGE_LENGTH, DEFAULT_HORIZONTAL_OFFSET,
    DEFAULT_SCANNER_HEIGHT, DEFAULT_SCANNER_WIDTH, DEFAULT_VERTICAL_OFFSET,
};
use crate::frame_processor::BoundingBox;
use serde::Serialize;

/// Rectangular scan cutout with rounded corners, positioned in a viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanRegion {
    top: f32,
    bottom: f32,
    left: f32,
    right: f32,
    corner_radius: f32,
    /// Length of each viewfinder corner leg
    edge_length: f32,
    scanner_width: f32,
    scanner_height: f32,
    horizontal_offset: f32,
    vertical_offset: f32,
    viewport_width: f32,
    viewport_height: f32,
}

impl ScanRegion {
    /// Compute cutout edges for a viewport
    ///
    /// The cutout centre sits at `(viewport_width * horizontal_offset,
    /// viewport_height * vertical_offset)`. Offsets outside 0.0..=1.0 are
    /// allowed and move the cutout off-canvas; nothing is clamped.
    pub fn compute(
        viewport_width: f32,
        viewport_height: f32,
        scanner_width: f32,
        scanner_height: f32,
        horizontal_offset: f32,
        vertical_offset: f32,
    ) -> BoundingBox {
        let center_x = viewport_width * horizontal_offset;
        let center_y = viewport_height * vertical_offset;
        BoundingBox {
            left: center_x - scanner_width / 2.0,
            right: center_x + scanner_width / 2.0,
            top: center_y - scanner_height / 2.0,
            bottom: center_y + scanner_height / 2.0,
        }
    }

    /// Create a region with default corner radius and edge length
    pub fn new(
        viewport_width: f32,
        viewport_height: f32,
        scanner_width: f32,
        scanner_height: f32,
        horizontal_offset: f32,
        vertical_offset: f32,
    ) -> Self {
        let edges = Self::compute(
            viewport_width,
            viewport_height,
            scanner_width,
            scanner_height,
            horizontal_offset,
            vertical_offset,
        );
        Self {
            top: edges.top,
            bottom: edges.bottom,
            left: edges.left,
            right: edges.right,
            corner_radius: DEFAULT_CORNER_RADIUS,
            edge_length: DEFAULT_EDGE_LENGTH,
            scanner_width,
            scanner_height,
            horizontal_offset,
            vertical_offset,
            viewport_width,
            viewport_height,
        }
    }

    /// Default 500x500 cutout centred in the viewport
    pub fn centered(viewport_width: f32, viewport_height: f32) -> Self {
        Self::new(
            viewport_width,
            viewport_height,
            DEFAULT_SCANNER_WIDTH,
            DEFAULT_SCANNER_HEIGHT,
            DEFAULT_HORIZONTAL_OFFSET,
            DEFAULT_VERTICAL_OFFSET,
        )
    }

    pub fn with_corner_radius(mut self, corner_radius: f32) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn with_edge_length(mut self, edge_length: f32) -> Self {
        self.edge_length = edge_length;
        self
    }

    /// Same cutout parameters recomputed for a new viewport size
    pub fn resized(&self, viewport_width: f32, viewport_height: f32) -> Self {
        Self::new(
            viewport_width,
            viewport_height,
            self.scanner_width,
            self.scanner_height,
            self.horizontal_offset,
            self.vertical_offset,
        )
        .with_corner_radius(self.corner_radius)
        .with_edge_length(self.edge_length)
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn edge_length(&self) -> f32 {
        self.edge_length
    }

    pub fn scanner_size(&self) -> (f32, f32) {
        (self.scanner_width, self.scanner_height)
    }

    pub fn offsets(&self) -> (f32, f32) {
        (self.horizontal_offset, self.vertical_offset)
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    /// Region with explicit edges, for tests that need a cutout which no
    /// parameter set produces exactly
    #[cfg(test)]
    pub(crate) fn from_edges(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
            ..Self::centered(right.max(left), bottom.max(top))
        }
    }

    /// Cutout edges as a bounding box
    pub fn edges(&self) -> BoundingBox {
        BoundingBox::new(self.top, self.left, self.bottom, self.right)
    }

    /// Point hit-test, boundary excluded
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x > self.left && x < self.right && y > self.top && y < self.bottom
    }
}
