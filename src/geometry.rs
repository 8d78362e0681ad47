//! Point sets for the shield and its decorative motifs.
//!
//! Nothing here draws; every function is plain arithmetic on a center point
//! and a radius.

use std::f32::consts::PI;

use crate::error::{Error, Result};

/// A point in canvas space (x grows right, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Number of vertices in the shield outline.
pub const SHIELD_POINTS: usize = 12;

/// Shield vertex offsets as multiples of the radius.
const SHIELD_OFFSETS: [(f32, f32); SHIELD_POINTS] = [
    // top
    (0.0, -1.05),
    (-0.7, -0.95),
    (-0.85, -0.6),
    // left side
    (-0.95, -0.2),
    (-0.95, 0.2),
    (-0.75, 0.55),
    // bottom point
    (0.0, 1.12),
    // right side
    (0.75, 0.55),
    (0.95, 0.2),
    (0.95, -0.2),
    // top right
    (0.85, -0.6),
    (0.7, -0.95),
];

/// Builds the 12-point shield polygon around `center`.
///
/// Point `i` mirrors point `(12 - i) % 12` about the vertical axis. A
/// non-positive radius collapses every point onto the center; renderers skip
/// such outlines.
pub fn build_shield_outline(center: Point2D, radius: f32) -> Vec<Point2D> {
    SHIELD_OFFSETS
        .iter()
        .map(|&(dx, dy)| Point2D::new(center.x + radius * dx, center.y + radius * dy))
        .collect()
}

/// Builds the left and right helix strands with `sample_count` points each.
///
/// Sample `i` sits at `t = i / sample_count`; the strands cross twice over the
/// vertical span `cy - 0.8r ..= cy + 0.8r`.
pub fn build_helix_strands(
    center: Point2D,
    radius: f32,
    sample_count: usize,
) -> Result<(Vec<Point2D>, Vec<Point2D>)> {
    if sample_count < 2 {
        return Err(Error::invalid(
            "sample_count",
            format!("helix needs at least 2 samples, got {sample_count}"),
        ));
    }

    let (left, right) = (0..sample_count)
        .map(|i| {
            let t = i as f32 / sample_count as f32;
            let y = center.y - radius * 0.8 + t * radius * 1.6;
            let swing = radius * 0.3 * (t * PI * 4.0).sin();
            (
                Point2D::new(center.x - swing, y),
                Point2D::new(center.x + swing, y),
            )
        })
        .unzip();

    Ok((left, right))
}

/// Returns the four "targeting" accent positions.
///
/// The upper pair sits wider than it is tall and the lower pair the other way
/// round.
pub fn build_corner_accent_positions(center: Point2D, radius: f32) -> [Point2D; 4] {
    [(-0.6, -0.5), (0.6, -0.5), (-0.5, 0.6), (0.5, 0.6)]
        .map(|(dx, dy)| Point2D::new(center.x + radius * dx, center.y + radius * dy))
}

/// Pushes every point away from `center` by `factor` of its offset.
///
/// A factor of `0.02` grows the outline by 2%.
pub fn scale_about(points: &[Point2D], center: Point2D, factor: f32) -> Vec<Point2D> {
    points
        .iter()
        .map(|p| {
            Point2D::new(
                p.x + (p.x - center.x) * factor,
                p.y + (p.y - center.y) * factor,
            )
        })
        .collect()
}

/// Absolute polygon area via the shoelace formula.
pub fn polygon_area(points: &[Point2D]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice.abs() / 2.0
}
