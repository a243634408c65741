//! Ring-Band Cell Placement
//!
//! Reference placement for the triangulator: fills concentric bands around the
//! origin with cells whose elevation grows with distance and is roughened by
//! Perlin noise.
//!
//! Bands, from the center outwards:
//! - abyss: left empty (a hole in the middle of the map)
//! - terrain: white cells
//! - scenery: grey cells, raised by `scenery_height_modifier`

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellStore, GREY, WHITE};
use super::coords::HexCoord;
use super::grid::axial_to_world;

/// Placement parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Rings left empty at the center
    pub abyss_radius: i32,
    /// Rings of playable terrain
    pub terrain_radius: i32,
    /// Rings of raised scenery around the terrain
    pub scenery_radius: i32,
    /// Perlin sampling frequency in world units
    pub noise_scale: f32,
    /// Extra levels added to scenery cells
    pub scenery_height_modifier: i32,
    /// Offsets the noise sampling position
    pub seed: i32,
    /// Color of terrain cells
    pub terrain_color: [f32; 4],
    /// Color of scenery cells
    pub scenery_color: [f32; 4],
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            abyss_radius: 1,
            terrain_radius: 5,
            scenery_radius: 2,
            noise_scale: 0.2,
            scenery_height_modifier: 2,
            seed: 0,
            terrain_color: WHITE,
            scenery_color: GREY,
        }
    }
}

impl PlacementConfig {
    /// Ring index at which cells stop being placed.
    pub fn outer_radius(&self) -> i32 {
        self.abyss_radius + self.terrain_radius + self.scenery_radius
    }

    /// True if a ring index falls inside the scenery band.
    pub fn is_scenery(&self, ring: i32) -> bool {
        ring >= self.outer_radius() - self.scenery_radius
    }
}

/// Perlin value remapped from `[-1, 1]` to `[0, 1]`.
fn perlin01(perlin: &Perlin, x: f32, z: f32) -> f32 {
    let v = perlin.get([x as f64, z as f64]) as f32;
    (v * 0.5 + 0.5).clamp(0.0, 1.0)
}

/// Elevation for a coordinate at ring `ring`.
fn elevation_at(config: &PlacementConfig, perlin: &Perlin, coord: HexCoord, ring: i32) -> i32 {
    let planar = axial_to_world(coord);
    let seed = config.seed as f32;
    let n = perlin01(
        perlin,
        (planar.x + seed) * config.noise_scale,
        (planar.y + seed) * config.noise_scale,
    );
    let mut elevation = (n * 5.0) as i32 * (ring as f32).sqrt() as i32 + ring;
    if config.is_scenery(ring) {
        elevation += config.scenery_height_modifier;
    }
    elevation
}

/// Places cells for every coordinate inside the terrain and scenery bands.
///
/// Iteration order is row-major over `(x, y)`, so the same config always
/// yields the same store.
pub fn generate_cells(config: &PlacementConfig) -> CellStore {
    let perlin = Perlin::new(config.seed as u32);
    let outer = config.outer_radius();
    let mut store = CellStore::new();

    for x in -outer..=outer {
        for y in -outer..=outer {
            let coord = HexCoord::from_axial(x, y);
            let ring = coord.ring();
            if ring >= outer || ring < config.abyss_radius {
                continue;
            }

            let elevation = elevation_at(config, &perlin, coord, ring);
            let color = if config.is_scenery(ring) {
                config.scenery_color
            } else {
                config.terrain_color
            };
            store.insert(Cell::new(coord, elevation, color));
        }
    }

    tracing::debug!(cells = store.len(), outer_radius = outer, "placed cells");
    store
}
