// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for scan-area filtering

use scan_overlay::frame_processor::BarcodeFormat;
use scan_overlay::{
    BoundingBox, DetectedRegion, OverlayTransform, ScanRegion, filter_detections,
    is_within_scan_area,
};
use std::collections::BTreeMap;

/// Cutout spanning 10..90 on both axes of a 100x100 viewport
fn inner_region() -> ScanRegion {
    ScanRegion::new(100.0, 100.0, 80.0, 80.0, 0.5, 0.5)
}

#[test]
fn test_boundary_is_excluded() {
    let r = ScanRegion::new(100.0, 100.0, 100.0, 100.0, 0.5, 0.5);
    let b = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    assert!(
        !is_within_scan_area(&b, Some(&r)),
        "Box equal to the region must be rejected"
    );
}

#[test]
fn test_contained_box_is_accepted() {
    let r = inner_region();
    let b = BoundingBox::new(20.0, 20.0, 80.0, 80.0);
    assert!(is_within_scan_area(&b, Some(&r)));
}

#[test]
fn test_each_edge_outside_rejects() {
    let r = inner_region();
    let outside = [
        BoundingBox::new(5.0, 20.0, 80.0, 80.0),
        BoundingBox::new(20.0, 5.0, 80.0, 80.0),
        BoundingBox::new(20.0, 20.0, 95.0, 80.0),
        BoundingBox::new(20.0, 20.0, 80.0, 95.0),
    ];
    for b in outside {
        assert!(!is_within_scan_area(&b, Some(&r)), "{b:?} should be rejected");
    }
}

#[test]
fn test_no_region_accepts_any_box() {
    let b = BoundingBox::new(5.0, 20.0, 80.0, 80.0);
    assert!(is_within_scan_area(&b, None));
}

#[test]
fn test_missing_bounding_box_never_passes() {
    let r = inner_region();
    let detections = vec![DetectedRegion::new("no box", None)];

    let identity = OverlayTransform::identity();
    assert!(filter_detections(detections.clone(), Some(&r), &identity).is_empty());
    assert!(filter_detections(detections, None, &identity).is_empty());
}

#[test]
fn test_payload_passes_through_untouched() {
    let r = inner_region();
    let mut fields = BTreeMap::new();
    fields.insert("address_city".to_string(), "Springfield".to_string());
    let bounds = BoundingBox::new(20.0, 20.0, 80.0, 80.0);
    let detection = DetectedRegion::new("DL123", Some(bounds))
        .with_format(BarcodeFormat::Pdf417)
        .with_fields(fields.clone());

    let accepted = filter_detections(
        vec![detection.clone()],
        Some(&r),
        &OverlayTransform::identity(),
    );
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].region, detection);
    assert_eq!(accepted[0].region.fields.as_ref(), Some(&fields));
}

#[test]
fn test_front_camera_flip_changes_acceptance() {
    // Box near the left of the image lands on the right of a mirrored view
    // Right half of the view: left 50, right 100, top 0, bottom 100
    let r = ScanRegion::new(100.0, 100.0, 50.0, 100.0, 0.75, 0.5);
    assert_eq!(r.edges(), BoundingBox::new(0.0, 50.0, 100.0, 100.0));
    let source = BoundingBox::new(10.0, 10.0, 40.0, 40.0);
    let detections = vec![DetectedRegion::new("qr", Some(source))];

    let straight = OverlayTransform::fit(100.0, 100.0, 100.0, 100.0, false).unwrap();
    let mirrored = OverlayTransform::fit(100.0, 100.0, 100.0, 100.0, true).unwrap();

    assert!(filter_detections(detections.clone(), Some(&r), &straight).is_empty());
    let accepted = filter_detections(detections, Some(&r), &mirrored);
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].overlay_box, BoundingBox::new(10.0, 60.0, 40.0, 90.0));
}

#[test]
fn test_accepted_detection_json() {
    let bounds = BoundingBox::new(20.0, 20.0, 80.0, 80.0);
    let detection = DetectedRegion::new("hello", Some(bounds)).with_format(BarcodeFormat::QrCode);
    let accepted = filter_detections(vec![detection], None, &OverlayTransform::identity());

    let json = serde_json::to_value(&accepted[0]).unwrap();
    assert_eq!(json["payload"], "hello");
    assert_eq!(json["format"], "qr_code");
    assert_eq!(json["overlay_box"]["top"], 20.0);
}
