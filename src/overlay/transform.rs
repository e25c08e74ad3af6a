// SPDX-License-Identifier: GPL-3.0-only

//! Source-image to overlay coordinate mapping
//!
//! The preview fills the overlay with center-crop scaling: the image is scaled
//! until it covers the view and the overflowing axis is cropped evenly on both
//! sides. Front-camera previews are additionally mirrored horizontally.

use crate::errors::OverlayError;
use crate::frame_processor::BoundingBox;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    scale: f32,
    /// Horizontal crop removed from each side after scaling
    post_scale_width_offset: f32,
    /// Vertical crop removed from each side after scaling
    post_scale_height_offset: f32,
    view_width: f32,
    flipped: bool,
}

impl OverlayTransform {
    /// No scaling, no crop, no mirroring
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            post_scale_width_offset: 0.0,
            post_scale_height_offset: 0.0,
            view_width: 0.0,
            flipped: false,
        }
    }

    /// Transform that covers a `view_width` x `view_height` overlay with an
    /// `image_width` x `image_height` image
    pub fn fit(
        image_width: f32,
        image_height: f32,
        view_width: f32,
        view_height: f32,
        flipped: bool,
    ) -> Result<Self, OverlayError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !(valid(image_width) && valid(image_height) && valid(view_width) && valid(view_height))
        {
            return Err(OverlayError::InvalidDimensions {
                image_width,
                image_height,
                view_width,
                view_height,
            });
        }

        let view_aspect = view_width / view_height;
        let image_aspect = image_width / image_height;

        let mut transform = Self {
            view_width,
            flipped,
            ..Self::identity()
        };
        if view_aspect > image_aspect {
            // Image is taller than the view: fit width, crop top and bottom
            transform.scale = view_width / image_width;
            transform.post_scale_height_offset = (view_width / image_aspect - view_height) / 2.0;
        } else {
            // Image is wider than the view: fit height, crop left and right
            transform.scale = view_height / image_height;
            transform.post_scale_width_offset = (view_height * image_aspect - view_width) / 2.0;
        }
        Ok(transform)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn translate_x(&self, x: f32) -> f32 {
        let scaled = x * self.scale - self.post_scale_width_offset;
        if self.flipped {
            self.view_width - scaled
        } else {
            scaled
        }
    }

    pub fn translate_y(&self, y: f32) -> f32 {
        y * self.scale - self.post_scale_height_offset
    }

    /// Translate all four edges
    ///
    /// Mirroring swaps left and right, so they are re-ordered afterwards.
    pub fn translate_box(&self, source: &BoundingBox) -> BoundingBox {
        let x0 = self.translate_x(source.left);
        let x1 = self.translate_x(source.right);
        BoundingBox {
            top: self.translate_y(source.top),
            left: x0.min(x1),
            bottom: self.translate_y(source.bottom),
            right: x0.max(x1),
        }
    }
}

impl Default for OverlayTransform {
    fn default() -> Self {
        Self::identity()
    }
}
