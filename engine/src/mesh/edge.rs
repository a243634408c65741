//! Edge Connectors
//!
//! The quad strip between two adjacent cells. Depending on the elevation
//! difference it is a flat bridge, a staircase (1 to 3 levels) or a cliff.
//!
//! Cliffs can carry "dots": extra vertices on their side rails where a
//! flanking cell's node geometry meets the cliff face. Without them the node
//! would leave a T-junction crack against the cliff.
//!
//! ```text
//!        v3 ────────── v4      neighbor side (higher)
//!        │              │
//!  left  │    bridge    │  right
//!        │              │
//!        v1 ────────── v2      lower side
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::assembler::TriangleSink;
use super::stairs::{StairPoint, rail, split_point, stitch};
use crate::world::cell::{Cell, CellStore, neighbor_or_virtual};
use crate::world::coords::HexCoord;
use crate::world::grid::{STEP_THRESHOLD, VIRTUAL_EDGE_STEPS, corner, elevation_to_height, next_direction, previous_direction};

/// Shape chosen for one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Equal elevations
    Flat,
    /// Stairs climbing `steps` levels
    Stairs { steps: i32 },
    /// Difference above the stair threshold, or a missing neighbor
    Cliff { left_dot: bool, right_dot: bool },
}

impl EdgeKind {
    /// Classifies an edge from its step count alone, before dots are known.
    pub fn from_steps(steps: i32) -> Self {
        match steps {
            0 => Self::Flat,
            s if s <= STEP_THRESHOLD => Self::Stairs { steps: s },
            _ => Self::Cliff {
                left_dot: false,
                right_dot: false,
            },
        }
    }
}

/// Summary of one triangulated edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub owner: HexCoord,
    /// Neighbor coordinate, or [`HexCoord::MISSING`] at the grid boundary
    pub neighbor: HexCoord,
    pub direction: usize,
    pub kind: EdgeKind,
    pub triangles: usize,
}

impl EdgeRecord {
    pub fn is_boundary(&self) -> bool {
        self.neighbor.is_missing()
    }
}

/// True if `coord` is responsible for its edge in direction `dir`.
///
/// Each edge between two placed cells is owned by the smaller coordinate;
/// edges facing a missing neighbor belong to the placed cell.
pub fn owns_edge(store: &CellStore, coord: HexCoord, dir: usize) -> bool {
    let neighbor = coord.neighbor(dir);
    !store.contains(neighbor) || coord < neighbor
}

/// Builds the connector on side `dir` of `cell`.
///
/// Callers check [`owns_edge`] first; this function does not.
pub fn triangulate_edge(
    store: &CellStore,
    cell: &Cell,
    dir: usize,
    color: [f32; 4],
    out: &mut impl TriangleSink,
) -> EdgeRecord {
    let real_neighbor = store.neighbor(cell.coord, dir).is_some();
    let (neighbor_center, neighbor_elevation) = neighbor_or_virtual(store, cell.coord, dir);
    let center = cell.base_position();

    let mut v1 = center + corner(dir);
    let mut v2 = center + corner(dir + 1);
    let mut v3 = neighbor_center + corner((dir + 3) % 6 + 1);
    let mut v4 = neighbor_center + corner((dir + 2) % 6 + 1);

    let steps = if real_neighbor {
        i32::try_from(cell.elevation.abs_diff(neighbor_elevation)).unwrap_or(i32::MAX)
    } else {
        VIRTUAL_EDGE_STEPS
    };

    // Orient the quad so the v1/v2 side is the lower one
    let mut left = previous_direction(dir);
    let mut right = next_direction(dir);
    if v1.y > v3.y {
        std::mem::swap(&mut v1, &mut v4);
        std::mem::swap(&mut v2, &mut v3);
        std::mem::swap(&mut left, &mut right);
    }
    let low = cell.elevation.min(neighbor_elevation);
    let high = cell.elevation.max(neighbor_elevation);

    let (kind, triangles) = match EdgeKind::from_steps(steps) {
        EdgeKind::Stairs { steps } => {
            let l = rail(v1, low, v3, steps);
            let r = rail(v2, low, v4, steps);
            (EdgeKind::Stairs { steps }, stitch(&l, &r, color, out))
        }
        EdgeKind::Flat => {
            let l = [StairPoint::at_level(v1, low), StairPoint::at_level(v3, high)];
            let r = [StairPoint::at_level(v2, low), StairPoint::at_level(v4, high)];
            (EdgeKind::Flat, stitch(&l, &r, color, out))
        }
        EdgeKind::Cliff { .. } => {
            let flank = FlankContext {
                store,
                cell,
                neighbor_elevation: real_neighbor.then_some(neighbor_elevation),
                low,
                high,
            };
            let left_dot = flank.dot(left, v1, v3);
            let right_dot = flank.dot(right, v2, v4);

            let l = cliff_chain(v1, low, left_dot, v3, high);
            let r = cliff_chain(v2, low, right_dot, v4, high);
            let kind = EdgeKind::Cliff {
                left_dot: left_dot.is_some(),
                right_dot: right_dot.is_some(),
            };
            (kind, stitch(&l, &r, color, out))
        }
    };

    EdgeRecord {
        owner: cell.coord,
        neighbor: if real_neighbor { cell.coord.neighbor(dir) } else { HexCoord::MISSING },
        direction: dir,
        kind,
        triangles,
    }
}

/// Everything needed to decide whether a cliff rail gets a dot.
struct FlankContext<'a> {
    store: &'a CellStore,
    cell: &'a Cell,
    neighbor_elevation: Option<i32>,
    low: i32,
    high: i32,
}

impl FlankContext<'_> {
    /// Dot on the rail `bottom -> top` for the flanking cell in `flank_dir`.
    ///
    /// The flank must sit strictly inside the cliff's height range and be
    /// within stair reach of the neighbor or of the cell itself.
    fn dot(&self, flank_dir: usize, bottom: Vec3, top: Vec3) -> Option<StairPoint> {
        let flank = self.store.neighbor(self.cell.coord, flank_dir)?;
        let e = flank.elevation;
        if e <= self.low || e >= self.high {
            return None;
        }

        let near_neighbor = self
            .neighbor_elevation
            .is_some_and(|n| e.abs_diff(n) <= STEP_THRESHOLD as u32);
        let near_cell = e.abs_diff(self.cell.elevation) <= STEP_THRESHOLD as u32;
        if !near_neighbor && !near_cell {
            return None;
        }

        let position = split_point(bottom, top, elevation_to_height(e));
        Some(StairPoint::at_level(position, e))
    }
}

fn cliff_chain(bottom: Vec3, low: i32, dot: Option<StairPoint>, top: Vec3, high: i32) -> Vec<StairPoint> {
    let mut chain = Vec::with_capacity(3);
    chain.push(StairPoint::at_level(bottom, low));
    chain.extend(dot);
    chain.push(StairPoint::at_level(top, high));
    chain
}
