//! Hex Terrace Mesh Builder
//!
//! Run with: `cargo run --release --bin hex-terrace -- --output terrain.obj`
//!
//! Places cells with the ring-band generator (or loads them from JSON),
//! triangulates them and writes the mesh.
//!
//! Examples:
//! - `hex-terrace -o terrain.obj` - default map, Perlin perturbation
//! - `hex-terrace --cells map.json --noise flat -o map.hexmesh`
//! - `hex-terrace --noise noise.png --config terrain.json -o out.json`
//!
//! Set `RUST_LOG=hex_terrace_engine=trace` to see every edge and node.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use hex_terrace_engine::mesh::export::{save_hexmesh, save_json, save_obj};
use hex_terrace_engine::mesh::{FlatNoise, Mesh, NoiseSource, NoiseTexture, PerlinNoise, TriangulationReport, Triangulator};
use hex_terrace_engine::world::{CellStore, PlacementConfig, generate_cells};
use hex_terrace_engine::{Result, TerrainConfig};

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Wavefront OBJ with vertex colors
    Obj,
    /// Binary .hexmesh
    Bin,
    /// serde JSON
    Json,
}

impl Format {
    fn from_extension(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("hexmesh") | Some("bin") => Format::Bin,
            Some("json") => Format::Json,
            _ => Format::Obj,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "hex-terrace")]
#[command(about = "Triangulate stepped hexagonal terrain into a mesh", long_about = None)]
struct Args {
    /// Output mesh path
    #[arg(short, long, default_value = "terrain.obj")]
    output: PathBuf,

    /// Output format (inferred from the output extension if omitted)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Load cells from a JSON array instead of generating them
    #[arg(long)]
    cells: Option<PathBuf>,

    /// Write the cell layout that was triangulated as JSON
    #[arg(long)]
    save_cells: Option<PathBuf>,

    /// Noise source: `flat`, `perlin`, or a path to an image
    #[arg(long, default_value = "perlin")]
    noise: String,

    /// Seed for Perlin noise
    #[arg(long, default_value_t = 0)]
    noise_seed: u32,

    /// Frequency multiplier for Perlin noise
    #[arg(long, default_value_t = 1.0)]
    noise_frequency: f32,

    /// Terrain settings JSON (absent fields keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Empty rings at the center of a generated map
    #[arg(long, default_value_t = 1)]
    abyss_radius: i32,

    /// Terrain rings of a generated map
    #[arg(long, default_value_t = 5)]
    terrain_radius: i32,

    /// Scenery rings of a generated map
    #[arg(long, default_value_t = 2)]
    scenery_radius: i32,

    /// Placement noise seed of a generated map
    #[arg(long, default_value_t = 0)]
    seed: i32,

    /// Write the triangulation report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => TerrainConfig::load_json(path)?,
        None => TerrainConfig::default(),
    };

    let mut cells = match &args.cells {
        Some(path) => {
            let store = CellStore::load_json(path)?;
            tracing::info!(cells = store.len(), path = %path.display(), "loaded cells");
            store
        }
        None => {
            let placement = PlacementConfig {
                abyss_radius: args.abyss_radius,
                terrain_radius: args.terrain_radius,
                scenery_radius: args.scenery_radius,
                seed: args.seed,
                ..PlacementConfig::default()
            };
            let store = generate_cells(&placement);
            tracing::info!(cells = store.len(), outer_radius = placement.outer_radius(), "generated cells");
            store
        }
    };

    if let Some(path) = &args.save_cells {
        cells.save_json(path)?;
    }

    let (mesh, report) = match args.noise.as_str() {
        "flat" => build(FlatNoise, config, &mut cells),
        "perlin" => build(PerlinNoise::new(args.noise_seed, args.noise_frequency), config, &mut cells),
        path => {
            let texture = NoiseTexture::load(Path::new(path))?;
            tracing::info!(width = texture.width(), height = texture.height(), "loaded noise texture");
            build(texture, config, &mut cells)
        }
    };

    let format = args.format.unwrap_or_else(|| Format::from_extension(&args.output));
    match format {
        Format::Obj => save_obj(&args.output, &mesh)?,
        Format::Bin => save_hexmesh(&args.output, &mesh)?,
        Format::Json => save_json(&args.output, &mesh)?,
    }

    if let Some(path) = &args.report {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    if let Some((min, max)) = mesh.bounds() {
        tracing::debug!(?min, ?max, "mesh bounds");
    }

    let (flat, stairs, cliffs) = report.edge_kinds();
    tracing::info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        flat,
        stairs,
        cliffs,
        nodes = report.nodes.len(),
        output = %args.output.display(),
        ?format,
        "wrote mesh"
    );
    Ok(())
}

fn build<N: NoiseSource>(noise: N, config: TerrainConfig, cells: &mut CellStore) -> (Mesh, TriangulationReport) {
    Triangulator::new(noise, config).triangulate_with_report(cells)
}
