// SPDX-License-Identifier: GPL-3.0-only

//! Vector paths for the scan overlay
//!
//! Paths are plain command lists so they can be handed to any 2D canvas.
//! [`Path::to_skia`] converts one for the built-in renderer.

use super::ScanRegion;
use crate::frame_processor::Point;

/// A single path drawing command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath
    MoveTo(Point),
    /// Straight line from the current point
    LineTo(Point),
    /// Quadratic Bézier from the current point via `control` to `to`
    QuadTo { control: Point, to: Point },
}

/// How overlapping subpaths are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    /// A point is inside when a ray from it crosses an odd number of edges
    EvenOdd,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub commands: Vec<PathCommand>,
    pub fill_rule: FillRule,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::QuadTo {
            control: Point::new(cx, cy),
            to: Point::new(x, y),
        });
        self
    }

    /// Append all commands of another path
    pub fn add_path(&mut self, other: &Path) -> &mut Self {
        self.commands.extend_from_slice(&other.commands);
        self
    }

    /// Convert to a `tiny-skia` path
    ///
    /// Returns `None` when the path has no drawable segments.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut builder = tiny_skia::PathBuilder::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
                PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
                PathCommand::QuadTo { control, to } => {
                    builder.quad_to(control.x, control.y, to.x, to.y)
                }
            }
        }
        builder.finish()
    }

    /// Number of subpaths, one per `MoveTo`
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }
}

/// Rounded-rectangle outline of the cutout
///
/// Each corner is a quadratic curve whose control point is the sharp corner.
pub fn cutout_path(region: &ScanRegion) -> Path {
    let (l, t, r, b) = (region.left(), region.top(), region.right(), region.bottom());
    let radius = region.corner_radius();

    let mut path = Path::new();
    path.move_to(l, t + radius)
        .quad_to(l, t, l + radius, t)
        .line_to(r - radius, t)
        .quad_to(r, t, r, t + radius)
        .line_to(r, b - radius)
        .quad_to(r, b, r - radius, b)
        .line_to(l + radius, b)
        .quad_to(l, b, l, b - radius)
        .line_to(l, t + radius);
    path.fill_rule = FillRule::EvenOdd;
    path
}

/// Full-viewport rectangle with the cutout punched out
///
/// Filled with the even-odd rule, this dims everything but the scan window.
pub fn mask_path(region: &ScanRegion) -> Path {
    let (w, h) = region.viewport_size();

    let mut path = Path::new();
    path.move_to(0.0, 0.0)
        .line_to(w, 0.0)
        .line_to(w, h)
        .line_to(0.0, h)
        .line_to(0.0, 0.0)
        .add_path(&cutout_path(region));
    path.fill_rule = FillRule::EvenOdd;
    path
}

/// Viewfinder accents: at each corner, two straight legs of `edge_length`
/// joined by the rounded corner
pub fn viewfinder_path(region: &ScanRegion) -> Path {
    let (l, t, r, b) = (region.left(), region.top(), region.right(), region.bottom());
    let radius = region.corner_radius();
    let edge = region.edge_length();

    let mut path = Path::new();
    // Top left
    path.move_to(l, t + edge)
        .line_to(l, t + radius)
        .move_to(l, t + radius)
        .quad_to(l, t, l + radius, t)
        .line_to(l + edge, t);
    // Top right
    path.move_to(r - edge, t)
        .line_to(r - radius, t)
        .move_to(r - radius, t)
        .quad_to(r, t, r, t + radius)
        .line_to(r, t + edge);
    // Bottom right
    path.move_to(r, b - edge)
        .line_to(r, b - radius)
        .move_to(r, b - radius)
        .quad_to(r, b, r - radius, b)
        .line_to(r - edge, b);
    // Bottom left
    path.move_to(l + edge, b)
        .line_to(l + radius, b)
        .move_to(l + radius, b)
        .quad_to(l, b, l, b - radius)
        .line_to(l, b - edge);
    path
}
