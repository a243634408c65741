//! Terrain Configuration
//!
//! Startup constants for perturbation and coloring. Grid geometry itself is
//! fixed at compile time in [`crate::world::grid`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::world::WHITE;

/// Tunables read once before triangulation.
///
/// `Default` matches the look of the reference terrain: strong horizontal
/// jitter, softer vertical jitter, and a very low noise frequency so that
/// neighboring vertices move almost together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Maximum X/Z displacement of a perturbed vertex
    pub cell_perturb_strength: f32,
    /// Maximum Y displacement of a perturbed vertex
    pub elevation_perturb_strength: f32,
    /// World-to-noise scale applied before sampling
    pub noise_scale: f32,
    /// Height added to a cell's stored position after its cap is built
    pub cap_lift: f32,
    /// Color of edge and node connectors (RGBA)
    pub connector_color: [f32; 4],
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            cell_perturb_strength: 1.0,
            elevation_perturb_strength: 0.75,
            noise_scale: 0.003,
            cap_lift: 0.1,
            connector_color: WHITE,
        }
    }
}

impl TerrainConfig {
    /// Same settings with perturbation turned off.
    pub fn unperturbed() -> Self {
        Self {
            cell_perturb_strength: 0.0,
            elevation_perturb_strength: 0.0,
            ..Self::default()
        }
    }

    /// Loads a config from JSON. Absent fields keep their defaults.
    pub fn load_json(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
