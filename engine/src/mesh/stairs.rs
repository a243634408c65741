//! Stair Rails and Stitching
//!
//! Every connector in the terrain (edge bridges, node triangles) is built from
//! the same two pieces:
//!
//! 1. A **rail**: a polyline from a lower corner to a higher one that climbs in
//!    discrete steps. Horizontal progress is uniform; vertical progress only
//!    happens on risers, so the samples alternate between risers and treads.
//! 2. A **stitch**: a zipper that triangulates the strip between two rails,
//!    always advancing the rail whose next sample is lower.
//!
//! Each sample carries a `(level, tread)` key. Two rails that climb the same
//! levels produce matching keys, so stitching them yields one quad per
//! segment split into two triangles. Rails with different step counts still
//! interleave in height order, which keeps mixed stairs free of overlaps.

use glam::Vec3;

use super::assembler::TriangleSink;
use crate::world::grid::stair_segments;

/// One rail sample with its ordering key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StairPoint {
    pub position: Vec3,
    /// Absolute elevation level the sample sits on
    pub level: i32,
    /// Index of the sample within its level, starting at 0
    pub tread: i32,
}

impl StairPoint {
    pub fn new(position: Vec3, level: i32, tread: i32) -> Self {
        Self {
            position,
            level,
            tread,
        }
    }

    /// A lone corner at `level`.
    pub fn at_level(position: Vec3, level: i32) -> Self {
        Self::new(position, level, 0)
    }

    /// Ordering key used by [`stitch`].
    #[inline]
    pub fn key(&self) -> (i32, i32) {
        (self.level, self.tread)
    }
}

/// Samples a staircase from `from` (at `from_level`) to `to`, `steps` levels
/// higher.
///
/// Returns `stair_segments(steps) + 1` samples. The first and last samples are
/// exactly `from` and `to`. A non-positive `steps` yields the straight segment
/// `[from, to]`.
pub fn rail(from: Vec3, from_level: i32, to: Vec3, steps: i32) -> Vec<StairPoint> {
    if steps <= 0 {
        return vec![
            StairPoint::at_level(from, from_level),
            StairPoint::at_level(to, from_level),
        ];
    }

    let n = stair_segments(steps);
    let delta = to - from;
    let mut points = Vec::with_capacity(n as usize + 1);

    for k in 0..=n {
        let climbed = (k + 1) / 2;
        let position = if k == 0 {
            from
        } else if k == n {
            to
        } else {
            from + Vec3::new(
                delta.x / n as f32 * k as f32,
                delta.y / steps as f32 * climbed as f32,
                delta.z / n as f32 * k as f32,
            )
        };
        // Level 0 starts at sample 0, level l >= 1 at sample 2l - 1
        let first = if climbed == 0 { 0 } else { 2 * climbed - 1 };
        points.push(StairPoint::new(position, from_level + climbed, k - first));
    }

    points
}

/// Triangulates the strip between two chains.
///
/// `(left[0], left[1], right[0])` must be counter-clockwise seen from the
/// front; every emitted triangle then shares that winding. The left chain
/// advances while its next key is not above the right chain's next key.
///
/// Emits `left.len() + right.len() - 2` triangles and returns that count.
pub fn stitch(left: &[StairPoint], right: &[StairPoint], color: [f32; 4], out: &mut impl TriangleSink) -> usize {
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let (mut i, mut j) = (0, 0);
    let mut emitted = 0;

    while i + 1 < left.len() || j + 1 < right.len() {
        let advance_left = i + 1 < left.len() && (j + 1 >= right.len() || left[i + 1].key() <= right[j + 1].key());
        if advance_left {
            out.add_triangle(left[i].position, left[i + 1].position, right[j].position, color);
            i += 1;
        } else {
            out.add_triangle(right[j].position, left[i].position, right[j + 1].position, color);
            j += 1;
        }
        emitted += 1;
    }

    emitted
}

/// Point on the segment `low -> high` at world height `y`.
///
/// Falls back to `low` when the segment is level.
pub fn split_point(low: Vec3, high: Vec3, y: f32) -> Vec3 {
    let rise = high.y - low.y;
    if rise.abs() <= f32::EPSILON {
        return low;
    }
    low + (high - low) * ((y - low.y) / rise)
}
