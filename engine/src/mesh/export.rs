//! Mesh Export (.obj, .hexmesh, .json)
//!
//! - **OBJ**: text, with per-vertex colors in the common `v x y z r g b`
//!   extension and `f a//a` faces referencing normals.
//! - **.hexmesh**: fixed 32-byte header | raw vertex data | raw index data.
//!   Geometry is written as raw bytes, so a round trip is lossless.
//! - **JSON**: the [`Mesh`] as serialized by serde.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bytemuck::{Pod, Zeroable};

use super::types::{Mesh, Vertex};
use crate::error::{Result, TerrainError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes identifying a .hexmesh file.
pub const HEXMESH_MAGIC: [u8; 4] = *b"HXMS";

/// Current file format version.
const HEXMESH_VERSION: u32 = 1;

/// Size of the header in bytes.
const HEADER_SIZE: usize = 32;

// ============================================================================
// HEADER
// ============================================================================

/// Fixed-size binary header for the .hexmesh format.
///
/// - `magic` (4) + `version` (4) + `vertex_count` (4) + `index_count` (4)
///   + `_reserved` (16) = 32.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct HexMeshHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub vertex_count: u32,
    pub index_count: u32,
    /// Must be zeroed
    pub _reserved: [u8; 16],
}

static_assertions::assert_eq_size!(HexMeshHeader, [u8; HEADER_SIZE]);

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}

// ============================================================================
// BINARY
// ============================================================================

/// Write a .hexmesh file.
///
/// ```text
/// [HexMeshHeader 32 bytes]
/// [vertex data: vertex_count * 40 bytes]
/// [index data:  index_count  *  4 bytes]
/// ```
pub fn save_hexmesh(path: &Path, mesh: &Mesh) -> Result<()> {
    let header = HexMeshHeader {
        magic: HEXMESH_MAGIC,
        version: HEXMESH_VERSION,
        vertex_count: mesh.vertices.len() as u32,
        index_count: mesh.indices.len() as u32,
        _reserved: [0u8; 16],
    };

    let mut file = create(path)?;
    file.write_all(bytemuck::bytes_of(&header))?;
    file.write_all(bytemuck::cast_slice::<Vertex, u8>(&mesh.vertices))?;
    file.write_all(bytemuck::cast_slice::<u32, u8>(&mesh.indices))?;
    file.flush()?;
    Ok(())
}

/// Read a .hexmesh file.
pub fn load_hexmesh(path: &Path) -> Result<Mesh> {
    let data = std::fs::read(path)?;
    if data.len() < HEADER_SIZE {
        return Err(TerrainError::FileTooShort);
    }

    let header: HexMeshHeader = bytemuck::pod_read_unaligned(&data[..HEADER_SIZE]);
    if header.magic != HEXMESH_MAGIC {
        return Err(TerrainError::InvalidMagic);
    }
    if header.version != HEXMESH_VERSION {
        return Err(TerrainError::UnsupportedVersion(header.version));
    }

    let vertex_size = std::mem::size_of::<Vertex>();
    let vertex_end = HEADER_SIZE + header.vertex_count as usize * vertex_size;
    let index_end = vertex_end + header.index_count as usize * std::mem::size_of::<u32>();
    if data.len() < index_end {
        return Err(TerrainError::Truncated {
            expected: index_end,
            found: data.len(),
        });
    }

    // The byte buffer carries no alignment guarantee, so read element-wise
    let vertices = data[HEADER_SIZE..vertex_end]
        .chunks_exact(vertex_size)
        .map(bytemuck::pod_read_unaligned::<Vertex>)
        .collect();
    let indices = data[vertex_end..index_end]
        .chunks_exact(4)
        .map(bytemuck::pod_read_unaligned::<u32>)
        .collect();

    Ok(Mesh { vertices, indices })
}

// ============================================================================
// TEXT
// ============================================================================

/// Writes OBJ text for `mesh` to any writer.
pub fn write_obj<W: Write>(mesh: &Mesh, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "# hex-terrace mesh")?;
    writeln!(out, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count())?;
    for v in &mesh.vertices {
        let [x, y, z] = v.position;
        let [r, g, b, _] = v.color;
        writeln!(out, "v {x} {y} {z} {r} {g} {b}")?;
    }
    for v in &mesh.vertices {
        let [x, y, z] = v.normal;
        writeln!(out, "vn {x} {y} {z}")?;
    }
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    Ok(())
}

/// Writes `mesh` as a Wavefront OBJ file.
pub fn save_obj(path: &Path, mesh: &Mesh) -> Result<()> {
    let mut file = create(path)?;
    write_obj(mesh, &mut file)?;
    file.flush()?;
    Ok(())
}

/// Writes `mesh` as JSON.
pub fn save_json(path: &Path, mesh: &Mesh) -> Result<()> {
    let mut file = create(path)?;
    serde_json::to_writer(&mut file, mesh)?;
    file.flush()?;
    Ok(())
}

/// Reads a mesh written by [`save_json`].
pub fn load_json(path: &Path) -> Result<Mesh> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

// ============================================================================
// TESTS
// ============================================================================
