// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for scan region geometry

use scan_overlay::ScanRegion;
use scan_overlay::frame_processor::Point;
use scan_overlay::overlay::{PathCommand, mask_path, viewfinder_path};

#[test]
fn test_edges_ordered_for_all_viewports_and_offsets() {
    let viewports = [(1.0, 1.0), (320.0, 240.0), (1080.0, 1920.0), (4000.0, 30.0)];
    let offsets = [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0];

    for (w, h) in viewports {
        for &ho in &offsets {
            for &vo in &offsets {
                let edges = ScanRegion::compute(w, h, 500.0, 300.0, ho, vo);
                assert!(edges.left < edges.right, "left < right for {w}x{h} @ {ho},{vo}");
                assert!(edges.top < edges.bottom, "top < bottom for {w}x{h} @ {ho},{vo}");
            }
        }
    }
}

#[test]
fn test_no_clamping_when_cutout_exceeds_viewport() {
    // Cutout larger than the viewport extends past every edge
    let edges = ScanRegion::compute(200.0, 100.0, 500.0, 500.0, 0.5, 0.5);
    assert_eq!(edges.left, -150.0);
    assert_eq!(edges.right, 350.0);
    assert_eq!(edges.top, -200.0);
    assert_eq!(edges.bottom, 300.0);
}

#[test]
fn test_offsets_outside_unit_range_move_off_canvas() {
    let edges = ScanRegion::compute(100.0, 100.0, 20.0, 20.0, 1.5, -0.5);
    assert_eq!(edges.left, 140.0);
    assert_eq!(edges.right, 160.0);
    assert_eq!(edges.top, -60.0);
    assert_eq!(edges.bottom, -40.0);
}

#[test]
fn test_region_edges_match_compute() {
    let region = ScanRegion::new(1080.0, 1920.0, 500.0, 500.0, 0.5, 0.3);
    let edges = ScanRegion::compute(1080.0, 1920.0, 500.0, 500.0, 0.5, 0.3);
    assert_eq!(region.edges(), edges);
}

#[test]
fn test_mask_path_covers_viewport() {
    let region = ScanRegion::centered(800.0, 600.0);
    let path = mask_path(&region);
    assert_eq!(
        path.commands[..3],
        [
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::LineTo(Point::new(800.0, 0.0)),
            PathCommand::LineTo(Point::new(800.0, 600.0)),
        ]
    );
}

#[test]
fn test_viewfinder_follows_region() {
    let region = ScanRegion::centered(1000.0, 1000.0).with_edge_length(40.0);
    let path = viewfinder_path(&region);
    // First leg runs up the left edge from top + edge_length
    assert_eq!(path.commands[0], PathCommand::MoveTo(Point::new(250.0, 290.0)));
}

#[test]
fn test_edges_track_compute_through_builders_and_resize() {
    let region = ScanRegion::new(640.0, 480.0, 200.0, 120.0, 0.25, 0.75)
        .with_corner_radius(8.0)
        .with_edge_length(25.0)
        .resized(1280.0, 720.0);
    let (w, h) = region.viewport_size();
    let (sw, sh) = region.scanner_size();
    let (ho, vo) = region.offsets();
    assert_eq!(region.edges(), ScanRegion::compute(w, h, sw, sh, ho, vo));
    assert_eq!(region.left(), 220.0);
    assert_eq!(region.top(), 480.0);
}
