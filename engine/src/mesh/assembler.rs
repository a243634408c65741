//! Mesh Assembler
//!
//! Collects triangles into an unindexed vertex stream (three fresh vertices
//! per triangle) so every face gets a flat normal and its own color.

use glam::Vec3;

use super::noise::NoiseSource;
use super::perturb::Perturber;
use super::types::{Mesh, Vertex, face_normal};

/// Anything that accepts colored triangles.
///
/// Edge, node and cap builders write through this trait, so they can be
/// exercised without a noise source.
pub trait TriangleSink {
    fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4]);
}

/// Raw triangle list, ignoring colors.
impl TriangleSink for Vec<[Vec3; 3]> {
    fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, _color: [f32; 4]) {
        self.push([a, b, c]);
    }
}

/// Accumulates perturbed triangles for one triangulation pass.
pub struct MeshAssembler<'a, N> {
    perturber: &'a Perturber<N>,
    positions: Vec<Vec3>,
    colors: Vec<[f32; 4]>,
}

impl<'a, N: NoiseSource> MeshAssembler<'a, N> {
    pub fn new(perturber: &'a Perturber<N>) -> Self {
        Self {
            perturber,
            positions: Vec::new(),
            colors: Vec::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Builds the mesh. Degenerate triangles get an up-facing normal.
    pub fn finish(self) -> Mesh {
        let mut vertices = Vec::with_capacity(self.positions.len());
        for (tri, colors) in self.positions.chunks_exact(3).zip(self.colors.chunks_exact(3)) {
            let normal = face_normal(tri[0], tri[1], tri[2]).try_normalize().unwrap_or(Vec3::Y);
            for (&p, &color) in tri.iter().zip(colors) {
                vertices.push(Vertex::new(p, normal, color));
            }
        }
        let indices = (0..vertices.len() as u32).collect();
        Mesh { vertices, indices }
    }
}

impl<N: NoiseSource> TriangleSink for MeshAssembler<'_, N> {
    fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4]) {
        for p in [a, b, c] {
            self.positions.push(self.perturber.perturb(p));
            self.colors.push(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use crate::mesh::noise::FlatNoise;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_finish_builds_flat_shaded_mesh() {
        let perturber = Perturber::new(FlatNoise, &TerrainConfig::default());
        let mut asm = MeshAssembler::new(&perturber);
        asm.add_triangle(Vec3::ZERO, Vec3::Z, Vec3::X, RED);
        asm.add_triangle(Vec3::X, Vec3::Z, Vec3::new(1.0, 0.0, 1.0), RED);
        assert_eq!(asm.triangle_count(), 2);

        let mesh = asm.finish();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, (0..6).collect::<Vec<u32>>());
        for v in &mesh.vertices {
            assert!((v.normal() - Vec3::Y).length() < 1e-6);
            assert_eq!(v.color, RED);
        }
    }

    #[test]
    fn test_degenerate_triangle_normal() {
        let perturber = Perturber::new(FlatNoise, &TerrainConfig::default());
        let mut asm = MeshAssembler::new(&perturber);
        asm.add_triangle(Vec3::X, Vec3::X, Vec3::X, RED);
        let mesh = asm.finish();
        assert_eq!(mesh.vertices[0].normal(), Vec3::Y);
    }
}
