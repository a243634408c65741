//! Cell Store
//!
//! The set of placed cells that the triangulator consumes. Cells are kept in
//! insertion order (output geometry follows that order) with a coordinate
//! index for neighbor lookups.
//!
//! # Example
//!
//! ```ignore
//! use hex_terrace_engine::world::{Cell, CellStore, HexCoord};
//!
//! let mut store = CellStore::new();
//! store.insert(Cell::new(HexCoord::ORIGIN, 0, [1.0; 4]));
//! store.insert(Cell::new(HexCoord::from_axial(0, 1), 2, [1.0; 4]));
//!
//! // Direction 0 (north-east) from the origin is (0, 1, -1)
//! let n = store.neighbor(HexCoord::ORIGIN, 0).unwrap();
//! assert_eq!(n.elevation, 2);
//! ```

use std::collections::HashMap;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::coords::HexCoord;
use super::grid::{MISSING_ELEVATION, cell_center};
use crate::error::{Result, TerrainError};

/// Default cell color (white).
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Color used for the outer scenery band.
pub const GREY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// One placed hex cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Unique cube coordinate
    pub coord: HexCoord,
    /// Elevation in levels
    pub elevation: i32,
    /// Cap color (RGBA, linear)
    pub color: [f32; 4],
    /// Current world position. Equal to [`Cell::base_position`] until a
    /// triangulation pass lifts and perturbs it for the cap.
    pub position: Vec3,
}

impl Cell {
    /// Creates a cell at its base world position.
    pub fn new(coord: HexCoord, elevation: i32, color: [f32; 4]) -> Self {
        Self {
            coord,
            elevation,
            color,
            position: cell_center(coord, elevation),
        }
    }

    /// Un-nudged world position derived from coordinate and elevation.
    ///
    /// Edge and node geometry always use this, never `position`.
    pub fn base_position(&self) -> Vec3 {
        cell_center(self.coord, self.elevation)
    }

    /// Restores `position` to the base position.
    pub fn reset_position(&mut self) {
        self.position = self.base_position();
    }
}

/// Serializable form of a cell, as exchanged with placement tools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub coord: HexCoord,
    pub elevation: i32,
    #[serde(default = "default_color")]
    pub color: [f32; 4],
}

fn default_color() -> [f32; 4] {
    WHITE
}

impl From<&Cell> for CellRecord {
    fn from(cell: &Cell) -> Self {
        Self {
            coord: cell.coord,
            elevation: cell.elevation,
            color: cell.color,
        }
    }
}

impl From<CellRecord> for Cell {
    fn from(record: CellRecord) -> Self {
        Cell::new(record.coord, record.elevation, record.color)
    }
}

/// Placed cells, in stable insertion order, indexed by coordinate.
#[derive(Debug, Clone, Default)]
pub struct CellStore {
    /// Cells in iteration order
    cells: Vec<Cell>,
    /// Coordinate -> slot in `cells`
    index: HashMap<HexCoord, usize>,
}

impl CellStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store, letting the last cell win for duplicate coordinates.
    ///
    /// A replaced cell keeps the slot of the first occurrence, so iteration
    /// order is still that of first appearance.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut store = Self::new();
        for cell in cells {
            if let Some(previous) = store.insert(cell) {
                tracing::warn!(
                    coord = %previous.coord,
                    old_elevation = previous.elevation,
                    new_elevation = cell.elevation,
                    "duplicate cell coordinate, last one wins"
                );
            }
        }
        store
    }

    /// Builds a store, rejecting duplicate or invalid coordinates.
    pub fn try_from_cells(cells: impl IntoIterator<Item = Cell>) -> Result<Self> {
        let mut store = Self::new();
        for cell in cells {
            if !cell.coord.is_valid() {
                return Err(TerrainError::InvalidCoordinate(cell.coord));
            }
            if store.contains(cell.coord) {
                return Err(TerrainError::DuplicateCoordinate(cell.coord));
            }
            store.insert(cell);
        }
        Ok(store)
    }

    /// Inserts a cell. Returns the cell previously stored at the same
    /// coordinate, which is replaced in place.
    pub fn insert(&mut self, cell: Cell) -> Option<Cell> {
        match self.index.get(&cell.coord) {
            Some(&slot) => Some(std::mem::replace(&mut self.cells[slot], cell)),
            None => {
                self.index.insert(cell.coord, self.cells.len());
                self.cells.push(cell);
                None
            }
        }
    }

    /// Gets the cell at a coordinate.
    pub fn get(&self, coord: HexCoord) -> Option<&Cell> {
        self.index.get(&coord).map(|&slot| &self.cells[slot])
    }

    /// Checks if a cell exists at a coordinate.
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.index.contains_key(&coord)
    }

    /// Gets the neighbor of `coord` in direction `dir`, if placed.
    ///
    /// A missing neighbor is the normal case at the grid boundary.
    pub fn neighbor(&self, coord: HexCoord, dir: usize) -> Option<&Cell> {
        self.get(coord.neighbor(dir))
    }

    /// Cell at an iteration slot.
    pub fn at(&self, slot: usize) -> &Cell {
        &self.cells[slot]
    }

    /// Mutable cell at an iteration slot. Coordinates must not be changed
    /// through this reference.
    pub(crate) fn at_mut(&mut self, slot: usize) -> &mut Cell {
        &mut self.cells[slot]
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the store contains no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Restores every cell's position to its base position.
    pub fn reset_positions(&mut self) {
        for cell in &mut self.cells {
            cell.reset_position();
        }
    }

    /// Serializable records for every cell, in order.
    pub fn records(&self) -> Vec<CellRecord> {
        self.cells.iter().map(CellRecord::from).collect()
    }

    /// Loads a JSON array of [`CellRecord`]s, rejecting bad coordinates.
    pub fn load_json(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let records: Vec<CellRecord> = serde_json::from_str(&data)?;
        Self::try_from_cells(records.into_iter().map(Cell::from))
    }

    /// Writes the cells as a JSON array of [`CellRecord`]s.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.records())?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// World position a missing neighbor would have, at the sentinel elevation.
///
/// Lets boundary edges and nodes close the mesh as a deep cliff.
pub fn virtual_neighbor_position(coord: HexCoord, dir: usize) -> Vec3 {
    cell_center(coord.neighbor(dir), MISSING_ELEVATION)
}

/// Base position and elevation of the neighbor in `dir`, real or virtual.
pub(crate) fn neighbor_or_virtual(store: &CellStore, coord: HexCoord, dir: usize) -> (Vec3, i32) {
    match store.neighbor(coord, dir) {
        Some(n) => (n.base_position(), n.elevation),
        None => (virtual_neighbor_position(coord, dir), MISSING_ELEVATION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::grid::LEVEL_HEIGHT;

    fn cell(x: i32, y: i32, elevation: i32) -> Cell {
        Cell::new(HexCoord::from_axial(x, y), elevation, WHITE)
    }

    #[test]
    fn test_cell_new_base_position() {
        let c = cell(0, 0, 3);
        assert_eq!(c.position, c.base_position());
        assert!((c.position.y - 3.0 * LEVEL_HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn test_insert_get() {
        let mut store = CellStore::new();
        assert!(store.insert(cell(0, 0, 1)).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(HexCoord::ORIGIN).map(|c| c.elevation), Some(1));
        assert!(store.get(HexCoord::from_axial(1, 0)).is_none());
    }

    #[test]
    fn test_neighbor_lookup() {
        let store = CellStore::from_cells([cell(0, 0, 0), cell(0, 1, 2), cell(1, 0, 5)]);
        // Direction 0 = (0, 1, -1), direction 1 = (1, 0, -1)
        assert_eq!(store.neighbor(HexCoord::ORIGIN, 0).map(|c| c.elevation), Some(2));
        assert_eq!(store.neighbor(HexCoord::ORIGIN, 1).map(|c| c.elevation), Some(5));
        assert!(store.neighbor(HexCoord::ORIGIN, 3).is_none());
    }

    #[test]
    fn test_duplicate_last_wins_keeps_slot() {
        let store = CellStore::from_cells([cell(0, 0, 1), cell(1, 0, 2), cell(0, 0, 7)]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.at(0).coord, HexCoord::ORIGIN);
        assert_eq!(store.at(0).elevation, 7);
        assert_eq!(store.at(1).elevation, 2);
    }

    #[test]
    fn test_try_from_cells_rejects_duplicates() {
        let result = CellStore::try_from_cells([cell(0, 0, 1), cell(0, 0, 2)]);
        assert!(matches!(result, Err(TerrainError::DuplicateCoordinate(c)) if c == HexCoord::ORIGIN));
    }

    #[test]
    fn test_try_from_cells_rejects_invalid() {
        let bad = Cell::new(HexCoord::new(1, 1, 1), 0, WHITE);
        let result = CellStore::try_from_cells([bad]);
        assert!(matches!(result, Err(TerrainError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_virtual_neighbor_position() {
        let p = virtual_neighbor_position(HexCoord::ORIGIN, 1);
        let expected = cell_center(HexCoord::new(1, 0, -1), MISSING_ELEVATION);
        assert_eq!(p, expected);
        assert!(p.y < 0.0);
    }

    #[test]
    fn test_reset_positions() {
        let mut store = CellStore::from_cells([cell(0, 0, 2)]);
        store.at_mut(0).position += Vec3::Y;
        store.reset_positions();
        assert_eq!(store.at(0).position, store.at(0).base_position());
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cells.json");
        let store = CellStore::from_cells([cell(0, 0, 1), cell(1, -1, -3)]);
        store.save_json(&path).unwrap();

        let loaded = CellStore::load_json(&path).unwrap();
        assert_eq!(loaded.records(), store.records());
    }

    #[test]
    fn test_record_color_defaults_to_white() {
        let json = r#"[{"coord":{"x":0,"y":0,"z":0},"elevation":4}]"#;
        let records: Vec<CellRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].color, WHITE);
    }
}
