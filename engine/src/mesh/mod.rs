//! Mesh Module
//!
//! Triangulation of a cell store into a single terrain mesh, plus the noise
//! that roughens it and the writers that save it.
//!
//! ## Pipeline
//! ```text
//! CellStore ──▶ Triangulator ──▶ MeshAssembler ──▶ Mesh ──▶ export
//!                 │ edge / node / cap              ▲
//!                 └──── stairs (rail + stitch)     └── Perturber(NoiseSource)
//! ```

pub mod assembler;
pub mod cap;
pub mod edge;
pub mod export;
pub mod node;
pub mod noise;
pub mod perturb;
pub mod stairs;
pub mod triangulator;
pub mod types;

pub use assembler::{MeshAssembler, TriangleSink};
pub use edge::{EdgeKind, EdgeRecord};
pub use node::{NodeKind, NodeRecord, classify};
pub use self::noise::{FlatNoise, NoiseSource, NoiseTexture, PerlinNoise};
pub use perturb::Perturber;
pub use stairs::{StairPoint, rail, split_point, stitch};
pub use triangulator::{TriangulationReport, Triangulator};
pub use types::{Mesh, Vertex};
