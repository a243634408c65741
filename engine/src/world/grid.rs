//! Grid Geometry Module
//!
//! Fixed hex metrics and the pure conversions between cube coordinates and
//! world space. Nothing in here holds state.
//!
//! ## Layout
//! Hexes are pointy-top: corner 0 points along +Z and corners advance
//! clockwise when viewed with +Z up the screen. Neighbouring cells are
//! separated by a border strip of `BORDER_THICKNESS` on each side, which is
//! where edge and node connectors live.
//!
//! ## Units
//! - 1 level = `LEVEL_HEIGHT` world units of elevation
//! - corner offsets are relative to the cell center and lie in the XZ plane

use glam::{IVec3, Vec2, Vec3};

use super::coords::HexCoord;

/// Distance from a cell center to any corner.
pub const OUTER_RADIUS: f32 = 1.0;

/// Distance from a cell center to the middle of any edge (outer * cos 30°).
pub const INNER_RADIUS: f32 = OUTER_RADIUS * 0.866_025_4;

/// Width of the connector strip each cell contributes between itself and a neighbor.
pub const BORDER_THICKNESS: f32 = 0.45;

/// Center-to-center footprint of one cell including both border strips.
pub const FULL_DIAMETER: f32 = OUTER_RADIUS * 2.0 + BORDER_THICKNESS * 2.0;

/// World height of one elevation level.
pub const LEVEL_HEIGHT: f32 = 0.3;

/// cos(30°), the horizontal scale of the axial projection.
pub const COS_30: f32 = 0.866_025_4;

/// Elevation given to neighbors that do not exist (grid boundary).
pub const MISSING_ELEVATION: i32 = -20;

/// Largest elevation difference that is still bridged with stairs.
pub const STEP_THRESHOLD: i32 = 3;

/// Step count assumed for an edge whose neighbor is missing; always a cliff.
pub const VIRTUAL_EDGE_STEPS: i32 = STEP_THRESHOLD + 1;

/// Corner offsets. Index 6 repeats index 0 so `i + 1` never needs wrapping.
pub const CORNERS: [Vec3; 7] = [
    Vec3::new(0.0, 0.0, OUTER_RADIUS),
    Vec3::new(INNER_RADIUS, 0.0, 0.5 * OUTER_RADIUS),
    Vec3::new(INNER_RADIUS, 0.0, -0.5 * OUTER_RADIUS),
    Vec3::new(0.0, 0.0, -OUTER_RADIUS),
    Vec3::new(-INNER_RADIUS, 0.0, -0.5 * OUTER_RADIUS),
    Vec3::new(-INNER_RADIUS, 0.0, 0.5 * OUTER_RADIUS),
    Vec3::new(0.0, 0.0, OUTER_RADIUS),
];

/// Cube-coordinate steps to the six neighbors, rotating around the cell.
///
/// Edge `i` of a cell runs from `corner(i)` to `corner(i + 1)` and faces the
/// neighbor in `DIRECTIONS[i]`.
pub const DIRECTIONS: [IVec3; 6] = [
    IVec3::new(0, 1, -1),  // north-east
    IVec3::new(1, 0, -1),  // east
    IVec3::new(1, -1, 0),  // south-east
    IVec3::new(0, -1, 1),  // south-west
    IVec3::new(-1, 0, 1),  // west
    IVec3::new(-1, 1, 0),  // north-west
];

/// Corner offset `i` for `i in 0..=6`; larger indices wrap.
#[inline]
pub fn corner(i: usize) -> Vec3 {
    CORNERS[i % 7]
}

/// Unit cube step for direction `i`; indices wrap modulo 6.
#[inline]
pub fn direction(i: usize) -> IVec3 {
    DIRECTIONS[i % 6]
}

/// Direction index immediately before `i` (counter-rotating).
#[inline]
pub fn previous_direction(i: usize) -> usize {
    (i + 5) % 6
}

/// Direction index immediately after `i`.
#[inline]
pub fn next_direction(i: usize) -> usize {
    (i + 1) % 6
}

/// Project a cube coordinate onto the XZ plane.
///
/// Returns `(x, z)` as a `Vec2`.
pub fn axial_to_world(coord: HexCoord) -> Vec2 {
    let x = (coord.x as f32 + 0.5 * coord.y as f32) * FULL_DIAMETER * COS_30;
    let z = coord.y as f32 * FULL_DIAMETER * 0.75;
    Vec2::new(x, z)
}

/// Project a cube coordinate to a 3D point at the given world height.
pub fn axial_to_world_at(coord: HexCoord, height: f32) -> Vec3 {
    let planar = axial_to_world(coord);
    Vec3::new(planar.x, height, planar.y)
}

/// World height of an elevation level.
#[inline]
pub fn elevation_to_height(elevation: i32) -> f32 {
    elevation as f32 * LEVEL_HEIGHT
}

/// World position of a cell center for a coordinate and elevation.
pub fn cell_center(coord: HexCoord, elevation: i32) -> Vec3 {
    axial_to_world_at(coord, elevation_to_height(elevation))
}

/// Number of rail samples for a staircase of `steps` levels.
///
/// A single level still gets a riser and a tread, hence the minimum of two.
#[inline]
pub fn stair_segments(steps: i32) -> i32 {
    (steps * 2 - 1).max(2)
}
