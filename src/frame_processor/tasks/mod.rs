// SPDX-License-Identifier: GPL-3.0-only

//! Frame processing tasks
//!
//! This module contains the detector abstraction and its implementations.
//! Detectors are black boxes: they take a frame and return detected regions
//! in source-image coordinates.

pub mod qr_detector;

use crate::errors::DetectorError;
use crate::frame_processor::types::{DetectedRegion, Frame};
use async_trait::async_trait;

pub use qr_detector::QrDetector;

#[async_trait]
pub trait BarcodeDetector: Send + Sync {
    async fn detect(&self, frame: &Frame) -> Result<Vec<DetectedRegion>, DetectorError>;
}

#[async_trait]
impl<T: BarcodeDetector + ?Sized> BarcodeDetector for std::sync::Arc<T> {
    async fn detect(&self, frame: &Frame) -> Result<Vec<DetectedRegion>, DetectorError> {
        (**self).detect(frame).await
    }
}
