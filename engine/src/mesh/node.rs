//! Node Connectors
//!
//! The triangular gap where three cells meet. Its three corners come from
//! the three cells, and its shape depends only on their elevations:
//!
//! | Kind           | Elevations (after rotation) | Geometry                        |
//! |----------------|-----------------------------|---------------------------------|
//! | `Simple`       | all equal, or all far apart | one flat/sloped triangle        |
//! | `Stairs1To2`   | `m < x == x`, within reach  | two rails from the low corner   |
//! | `Stairs2To1`   | `m == m < x`, within reach  | two rails to the high corner    |
//! | `Stairs`       | all pairs within reach      | rail plus a bent two-leg rail   |
//! | `BrokenStairs` | anything else               | split at a mid point, two fans  |
//!
//! "Within reach" means an elevation difference of at most
//! [`STEP_THRESHOLD`]. Node rails use the same sampling as edge rails, so
//! node and edge vertices coincide along shared sides.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::assembler::TriangleSink;
use super::stairs::{StairPoint, rail, split_point, stitch};
use crate::world::cell::{Cell, CellStore, neighbor_or_virtual};
use crate::world::coords::HexCoord;
use crate::world::grid::{STEP_THRESHOLD, corner, next_direction};

/// Shape chosen for one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Simple,
    Stairs,
    Stairs1To2,
    Stairs2To1,
    BrokenStairs,
}

/// Summary of one triangulated node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Owner first, then the neighbors in directions `i` and `i + 1`.
    /// Missing neighbors are [`HexCoord::MISSING`].
    pub cells: [HexCoord; 3],
    pub kind: NodeKind,
    pub triangles: usize,
}

/// Classifies a node from its canonical heights `(h0, h1, h2)`.
///
/// Total over all inputs; the order of the checks matters.
pub fn classify(h0: i32, h1: i32, h2: i32) -> NodeKind {
    let d01 = h0.abs_diff(h1);
    let d02 = h0.abs_diff(h2);
    let d12 = h1.abs_diff(h2);
    let far = |d: u32| d > STEP_THRESHOLD as u32;
    let near = |d: u32| d <= STEP_THRESHOLD as u32;

    let simple = (far(d01) && far(d02) && far(d12))
        || (d01 == 0 && far(d02) && far(d12))
        || (far(d01) && d02 == 0 && far(d12))
        || (far(d01) && far(d02) && d12 == 0)
        || (d01 == 0 && d02 == 0 && d12 == 0);

    if simple {
        NodeKind::Simple
    } else if d12 == 0 && near(d01) {
        NodeKind::Stairs1To2
    } else if d01 == 0 && near(d02) {
        NodeKind::Stairs2To1
    } else if near(d01) && near(d02) && near(d12) {
        NodeKind::Stairs
    } else {
        NodeKind::BrokenStairs
    }
}

/// Rotates the corners so index 0 holds a minimum height.
///
/// Rotation is cyclic, so winding is preserved. If the minimum appears twice
/// the result reads `(m, m, x)`.
pub fn canonicalize(mut corners: [Vec3; 3], mut heights: [i32; 3]) -> ([Vec3; 3], [i32; 3]) {
    // At least one rotation, stopping as soon as index 0 is a minimum
    loop {
        corners.rotate_left(1);
        heights.rotate_left(1);
        if heights[0] <= heights[1] && heights[0] <= heights[2] {
            break;
        }
    }
    if heights[0] == heights[2] {
        corners.rotate_right(1);
        heights.rotate_right(1);
    }
    (corners, heights)
}

/// True if `coord` is responsible for the node between directions `dir` and
/// `dir + 1`: it must be smaller than both neighbors, with missing neighbors
/// counting as larger than any placed cell.
pub fn owns_node(store: &CellStore, coord: HexCoord, dir: usize) -> bool {
    let key = |d: usize| {
        let n = coord.neighbor(d);
        if store.contains(n) { n } else { HexCoord::MISSING }
    };
    coord < key(dir) && coord < key(next_direction(dir))
}

/// Builds the node at the corner `dir + 1` of `cell`.
///
/// Callers check [`owns_node`] first; this function does not.
pub fn triangulate_node(
    store: &CellStore,
    cell: &Cell,
    dir: usize,
    color: [f32; 4],
    out: &mut impl TriangleSink,
) -> NodeRecord {
    let next = next_direction(dir);
    let (c1, h1) = neighbor_or_virtual(store, cell.coord, dir);
    let (c2, h2) = neighbor_or_virtual(store, cell.coord, next);

    let corners = [
        cell.base_position() + corner(dir + 1),
        c1 + corner((dir + 2) % 6 + 1),
        c2 + corner((dir + 4) % 6 + 1),
    ];
    let (kind, triangles) = triangulate_corners(corners, [cell.elevation, h1, h2], color, out);

    let placed = |d: usize| {
        let n = cell.coord.neighbor(d);
        if store.contains(n) { n } else { HexCoord::MISSING }
    };
    NodeRecord {
        cells: [cell.coord, placed(dir), placed(next)],
        kind,
        triangles,
    }
}

/// Triangulates a node from its three corners, counter-clockwise from above,
/// and their elevations.
pub fn triangulate_corners(
    corners: [Vec3; 3],
    heights: [i32; 3],
    color: [f32; 4],
    out: &mut impl TriangleSink,
) -> (NodeKind, usize) {
    let ([v0, v1, v2], [h0, h1, h2]) = canonicalize(corners, heights);
    let kind = classify(h0, h1, h2);

    let triangles = match kind {
        NodeKind::Simple => {
            out.add_triangle(v0, v1, v2, color);
            1
        }
        NodeKind::Stairs1To2 => {
            let left = rail(v0, h0, v1, h1 - h0);
            let right = rail(v0, h0, v2, h2 - h0);
            stitch(&left, &right[1..], color, out)
        }
        NodeKind::Stairs2To1 => {
            let left = rail(v1, h1, v2, h2 - h1);
            let right = rail(v0, h0, v2, h2 - h0);
            stitch(&left, &right[..right.len() - 1], color, out)
        }
        NodeKind::Stairs => {
            let mut left = rail(v0, h0, v1, h1 - h0);
            let mut right = rail(v0, h0, v2, h2 - h0).split_off(1);
            if h1 > h2 {
                // Right leg climbs on past v2 up to v1
                let bend = rail(v2, h2, v1, h1 - h2);
                right.extend_from_slice(&bend[1..bend.len() - 1]);
            } else {
                // Left leg climbs on past v1 up to v2
                let bend = rail(v1, h1, v2, h2 - h1);
                left.extend_from_slice(&bend[1..bend.len() - 1]);
            }
            stitch(&left, &right, color, out)
        }
        NodeKind::BrokenStairs => broken_stairs([v0, v1, v2], [h0, h1, h2], color, out),
    };

    (kind, triangles)
}

/// Rail between two corners, or the bare segment when they are out of reach.
fn reach(from: Vec3, from_level: i32, to: Vec3, to_level: i32) -> Vec<StairPoint> {
    if to_level.abs_diff(from_level) > STEP_THRESHOLD as u32 {
        vec![
            StairPoint::at_level(from, from_level),
            StairPoint::at_level(to, to_level),
        ]
    } else {
        rail(from, from_level, to, to_level - from_level)
    }
}

/// Splits the node at the height of the middle corner, on the side running
/// from the lowest to the highest corner, and fans both halves to that point.
fn broken_stairs(v: [Vec3; 3], h: [i32; 3], color: [f32; 4], out: &mut impl TriangleSink) -> usize {
    let [v0, v1, v2] = v;
    let [h0, h1, h2] = h;

    if h1 < h2 {
        let mid = [StairPoint::at_level(split_point(v0, v2, v1.y), h1)];
        stitch(&reach(v0, h0, v1, h1), &mid, color, out) + stitch(&reach(v1, h1, v2, h2), &mid, color, out)
    } else {
        let mid = [StairPoint::at_level(split_point(v0, v1, v2.y), h2)];
        stitch(&mid, &reach(v0, h0, v2, h2), color, out) + stitch(&mid, &reach(v2, h2, v1, h1), color, out)
    }
}
