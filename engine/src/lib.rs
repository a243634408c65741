//! Hex Terrace Engine Library
//!
//! Builds one watertight, colored triangle mesh from a set of hexagonal cells
//! at integer elevations. Small elevation differences between neighbors are
//! bridged with stairs, large ones with cliffs, and the corners where three
//! cells meet are filled with matching stair or cliff geometry.
//!
//! # Modules
//!
//! - [`world`] - Hex grid geometry, cube coordinates, the cell store and placement
//! - [`mesh`] - Edge/node/cap triangulation, noise perturbation and mesh export
//! - [`config`] - Perturbation and color settings
//! - [`error`] - Error type for loading and saving
//!
//! # Example
//!
//! ```ignore
//! use hex_terrace_engine::mesh::{PerlinNoise, Triangulator};
//! use hex_terrace_engine::world::{PlacementConfig, generate_cells};
//! use hex_terrace_engine::TerrainConfig;
//!
//! // Place cells in rings around the origin
//! let mut cells = generate_cells(&PlacementConfig::default());
//!
//! // Triangulate with Perlin perturbation
//! let triangulator = Triangulator::new(PerlinNoise::new(0, 1.0), TerrainConfig::default());
//! let mesh = triangulator.triangulate(&mut cells);
//!
//! hex_terrace_engine::mesh::export::save_obj("terrain.obj".as_ref(), &mesh)?;
//! ```

pub mod config;
pub mod error;
pub mod mesh;
pub mod world;

// Re-export the types most callers need
pub use config::TerrainConfig;
pub use error::{Result, TerrainError};
pub use mesh::{Mesh, Triangulator, Vertex};
pub use world::{Cell, CellStore, HexCoord};
