//! World Module
//!
//! Hex grid geometry, cube coordinates, the cell store and the reference
//! ring-band placement.
//!
//! ## Default Grid
//! Pointy-top hexes of outer radius 1 with a 0.45 border strip; one elevation
//! level is 0.3 world units tall.

pub mod cell;
pub mod coords;
pub mod grid;
pub mod placement;

pub use cell::{Cell, CellRecord, CellStore, GREY, WHITE, virtual_neighbor_position};
pub use coords::HexCoord;
pub use grid::{
    CORNERS, DIRECTIONS, LEVEL_HEIGHT, MISSING_ELEVATION, STEP_THRESHOLD, axial_to_world,
    axial_to_world_at, corner, direction,
};
pub use placement::{PlacementConfig, generate_cells};
