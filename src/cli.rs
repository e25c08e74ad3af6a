// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for scan overlay operations
//!
//! This module provides command-line functionality for:
//! - Printing the scan region for a viewport
//! - Scanning image files and printing accepted detections as JSON
//! - Rendering the overlay onto an image

use futures::future::join_all;
use image::imageops::{self, FilterType};
use scan_overlay::AppResult;
use scan_overlay::config::ScannerConfig;
use scan_overlay::frame_processor::{
    AcceptedDetection, Frame, FrameProcessor, QrDetector, scan_region_channel,
};
use scan_overlay::overlay::{OverlayRenderer, OverlayTransform, ScanRegion};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Overlay view settings shared by `scan` and `render`
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    /// View size; the image size is used when absent
    pub view_size: Option<(u32, u32)>,
    /// Mirror the preview (front camera)
    pub flip: bool,
    /// Skip scan-area filtering
    pub no_roi: bool,
}

/// Result of scanning one image
#[derive(Debug, Serialize)]
struct ScanReport {
    image: PathBuf,
    view_width: u32,
    view_height: u32,
    scan_region: Option<ScanRegion>,
    detections: Vec<AcceptedDetection>,
}

/// Print the scan region for a viewport as JSON
pub fn print_region(width: f32, height: f32, config: &ScannerConfig) -> AppResult<()> {
    let region = config.scan_region(width, height);
    println!("{}", serde_json::to_string_pretty(&region)?);
    Ok(())
}

/// Scan image files concurrently and print one JSON report per image
pub async fn scan_images(
    paths: Vec<PathBuf>,
    options: ViewOptions,
    config: &ScannerConfig,
) -> AppResult<()> {
    let detector = Arc::new(QrDetector::with_max_dimension(
        config.detector_max_dimension,
    ));

    let scans = paths.iter().map(|path| {
        let detector = Arc::clone(&detector);
        async move { scan_image(path, detector, options, config).await }
    });

    let mut reports = Vec::with_capacity(paths.len());
    for (path, result) in paths.iter().zip(join_all(scans).await) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to scan image"),
        }
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

async fn scan_image(
    path: &Path,
    detector: Arc<QrDetector>,
    options: ViewOptions,
    config: &ScannerConfig,
) -> AppResult<ScanReport> {
    let image = image::open(path)?;
    let frame = Frame::from_image(&image)?;
    let (view_width, view_height) = options
        .view_size
        .unwrap_or((frame.width, frame.height));

    let region = scan_region(view_width, view_height, options, config);
    let transform = view_transform(&frame, view_width, view_height, options, config)?;

    let (_publisher, rx) = scan_region_channel(region);
    let processor = FrameProcessor::new(detector, rx);
    let detections = processor.process(&frame, &transform).await;

    info!(
        path = %path.display(),
        accepted = detections.len(),
        "Scanned image"
    );

    Ok(ScanReport {
        image: path.to_path_buf(),
        view_width,
        view_height,
        scan_region: region,
        detections,
    })
}

/// Scan one image and write it with the overlay drawn on top
pub async fn render_image(
    path: &Path,
    output: &Path,
    options: ViewOptions,
    config: &ScannerConfig,
) -> AppResult<()> {
    let image = image::open(path)?;
    let frame = Frame::from_image(&image)?;
    let (view_width, view_height) = options
        .view_size
        .unwrap_or((frame.width, frame.height));

    let region = scan_region(view_width, view_height, options, config);
    let transform = view_transform(&frame, view_width, view_height, options, config)?;

    let (_publisher, rx) = scan_region_channel(region);
    let processor = FrameProcessor::new(
        QrDetector::with_max_dimension(config.detector_max_dimension),
        rx,
    );
    let detections = processor.process(&frame, &transform).await;

    // Same center-crop fit as the transform, then mirror for front cameras
    let mut canvas = image
        .resize_to_fill(view_width, view_height, FilterType::Triangle)
        .to_rgba8();
    if transform.is_flipped() {
        imageops::flip_horizontal_in_place(&mut canvas);
    }

    OverlayRenderer::default().render(&mut canvas, region.as_ref(), &detections);
    canvas.save(output)?;

    info!(
        output = %output.display(),
        accepted = detections.len(),
        "Wrote overlay image"
    );
    Ok(())
}

fn scan_region(
    view_width: u32,
    view_height: u32,
    options: ViewOptions,
    config: &ScannerConfig,
) -> Option<ScanRegion> {
    (config.roi_enabled && !options.no_roi)
        .then(|| config.scan_region(view_width as f32, view_height as f32))
}

fn view_transform(
    frame: &Frame,
    view_width: u32,
    view_height: u32,
    options: ViewOptions,
    config: &ScannerConfig,
) -> AppResult<OverlayTransform> {
    Ok(OverlayTransform::fit(
        frame.width as f32,
        frame.height as f32,
        view_width as f32,
        view_height as f32,
        options.flip || config.front_camera,
    )?)
}
