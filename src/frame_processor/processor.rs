// SPDX-License-Identifier: GPL-3.0-only

//! Per-frame detect, translate and filter
//!
//! The layout path publishes recomputed scan regions through a
//! [`ScanRegionPublisher`]. Each published region is an immutable `Arc`
//! snapshot, so a frame callback reading it mid-resize sees either the old
//! rectangle or the new one, never a mix.

use super::tasks::BarcodeDetector;
use super::types::{AcceptedDetection, Frame};
use crate::overlay::{OverlayTransform, ScanRegion, filter_detections};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, trace};

/// Latest scan region, or `None` when ROI filtering is disabled
pub type ScanRegionSnapshot = Option<Arc<ScanRegion>>;

/// Create a publisher/receiver pair for scan region snapshots
pub fn scan_region_channel(
    initial: Option<ScanRegion>,
) -> (ScanRegionPublisher, watch::Receiver<ScanRegionSnapshot>) {
    let (tx, rx) = watch::channel(initial.map(Arc::new));
    (ScanRegionPublisher { tx }, rx)
}

/// Write side of the scan region channel, owned by the layout path
#[derive(Debug)]
pub struct ScanRegionPublisher {
    tx: watch::Sender<ScanRegionSnapshot>,
}

impl ScanRegionPublisher {
    /// Replace the current region
    pub fn publish(&self, region: ScanRegion) {
        debug!(
            top = region.top(),
            left = region.left(),
            bottom = region.bottom(),
            right = region.right(),
            "Publishing scan region"
        );
        self.tx.send_replace(Some(Arc::new(region)));
    }

    /// Disable ROI filtering
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Recompute the current region for a new viewport size
    ///
    /// Does nothing when no region is set.
    pub fn resize(&self, viewport_width: f32, viewport_height: f32) {
        self.tx.send_modify(|current| {
            let next = current
                .as_ref()
                .map(|region| Arc::new(region.resized(viewport_width, viewport_height)));
            *current = next;
        });
    }

    pub fn current(&self) -> ScanRegionSnapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScanRegionSnapshot> {
        self.tx.subscribe()
    }
}

/// Runs a detector on frames and keeps only detections inside the scan area
pub struct FrameProcessor<D> {
    detector: D,
    scan_region: watch::Receiver<ScanRegionSnapshot>,
}

impl<D: BarcodeDetector> FrameProcessor<D> {
    pub fn new(detector: D, scan_region: watch::Receiver<ScanRegionSnapshot>) -> Self {
        Self {
            detector,
            scan_region,
        }
    }

    /// Detect, translate and filter one frame
    ///
    /// Detector failures are logged and yield no detections; the frame is
    /// not retried.
    pub async fn process(
        &self,
        frame: &Frame,
        transform: &OverlayTransform,
    ) -> Vec<AcceptedDetection> {
        let regions = match self.detector.detect(frame).await {
            Ok(regions) => regions,
            Err(e) => {
                error!(error = %e, "Barcode detection failed");
                return Vec::new();
            }
        };

        if regions.is_empty() {
            trace!("No barcode has been detected");
            return Vec::new();
        }

        let snapshot = self.scan_region.borrow().clone();
        let detected = regions.len();
        let accepted = filter_detections(regions, snapshot.as_deref(), transform);
        debug!(
            detected,
            accepted = accepted.len(),
            roi = snapshot.is_some(),
            "Filtered detections"
        );
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DetectorError;
    use crate::frame_processor::types::{BoundingBox, DetectedRegion};
    use async_trait::async_trait;

    struct FixedDetector(Result<Vec<DetectedRegion>, DetectorError>);

    #[async_trait]
    impl BarcodeDetector for FixedDetector {
        async fn detect(&self, _frame: &Frame) -> Result<Vec<DetectedRegion>, DetectorError> {
            self.0.clone()
        }
    }

    fn frame() -> Frame {
        Frame::new(1, 1, 4, Arc::from(vec![0u8; 4])).unwrap()
    }

    fn detections() -> Vec<DetectedRegion> {
        vec![
            DetectedRegion::new("inside", Some(BoundingBox::new(20.0, 20.0, 80.0, 80.0))),
            DetectedRegion::new("overlap", Some(BoundingBox::new(5.0, 20.0, 80.0, 80.0))),
            DetectedRegion::new("no box", None),
        ]
    }

    #[tokio::test]
    async fn test_process_filters_by_published_region() {
        let region = ScanRegion::new(100.0, 100.0, 80.0, 80.0, 0.5, 0.5);
        let (_publisher, rx) = scan_region_channel(Some(region));
        let processor = FrameProcessor::new(FixedDetector(Ok(detections())), rx);

        let accepted = processor.process(&frame(), &OverlayTransform::identity()).await;
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].region.payload, "inside");
    }

    #[tokio::test]
    async fn test_cleared_region_passes_all_boxed_detections() {
        let region = ScanRegion::new(100.0, 100.0, 80.0, 80.0, 0.5, 0.5);
        let (publisher, rx) = scan_region_channel(Some(region));
        let processor = FrameProcessor::new(FixedDetector(Ok(detections())), rx);

        publisher.clear();
        let accepted = processor.process(&frame(), &OverlayTransform::identity()).await;
        let payloads: Vec<&str> = accepted.iter().map(|a| a.region.payload.as_str()).collect();
        assert_eq!(payloads, vec!["inside", "overlap"]);
    }

    #[tokio::test]
    async fn test_detector_error_yields_nothing() {
        let (_publisher, rx) = scan_region_channel(None);
        let processor = FrameProcessor::new(
            FixedDetector(Err(DetectorError::Engine("boom".to_string()))),
            rx,
        );
        let accepted = processor.process(&frame(), &OverlayTransform::identity()).await;
        assert!(accepted.is_empty());
    }

    #[test]
    fn test_resize_replaces_snapshot() {
        let (publisher, rx) = scan_region_channel(Some(ScanRegion::centered(1000.0, 1000.0)));
        let before = rx.borrow().clone().unwrap();

        publisher.resize(2000.0, 1000.0);
        let after = rx.borrow().clone().unwrap();

        assert_eq!(before.left(), 250.0);
        assert_eq!(after.left(), 750.0);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_resize_without_region_is_noop() {
        let (publisher, rx) = scan_region_channel(None);
        publisher.resize(100.0, 100.0);
        assert!(rx.borrow().is_none());
        assert!(publisher.current().is_none());
    }
}
