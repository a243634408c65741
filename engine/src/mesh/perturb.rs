//! Vertex Perturbation
//!
//! Displaces vertices by a smooth noise field so the grid does not look
//! machine-made. The displacement depends only on the vertex's own planar
//! position, so coincident vertices from different triangles move together
//! and the surface stays watertight.

use glam::Vec3;

use super::noise::NoiseSource;
use crate::config::TerrainConfig;

/// Applies noise displacement with fixed strengths.
#[derive(Clone, Debug)]
pub struct Perturber<N> {
    noise: N,
    cell_strength: f32,
    elevation_strength: f32,
    noise_scale: f32,
}

impl<N: NoiseSource> Perturber<N> {
    pub fn new(noise: N, config: &TerrainConfig) -> Self {
        Self {
            noise,
            cell_strength: config.cell_perturb_strength,
            elevation_strength: config.elevation_perturb_strength,
            noise_scale: config.noise_scale,
        }
    }

    /// Displaced copy of `position`.
    ///
    /// Each axis moves by `(sample * 2 - 1) * strength`, with X/Z using the
    /// cell strength and Y the elevation strength.
    pub fn perturb(&self, position: Vec3) -> Vec3 {
        let sample = self
            .noise
            .sample(position.x * self.noise_scale, position.z * self.noise_scale);
        Vec3::new(
            position.x + (sample.x * 2.0 - 1.0) * self.cell_strength,
            position.y + (sample.y * 2.0 - 1.0) * self.elevation_strength,
            position.z + (sample.z * 2.0 - 1.0) * self.cell_strength,
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;
    use crate::mesh::noise::{FlatNoise, PerlinNoise};

    struct Constant(Vec4);

    impl NoiseSource for Constant {
        fn sample(&self, _x: f32, _z: f32) -> Vec4 {
            self.0
        }
    }

    #[test]
    fn test_flat_noise_is_identity() {
        let p = Perturber::new(FlatNoise, &TerrainConfig::default());
        let v = Vec3::new(3.5, -1.2, 8.0);
        assert_eq!(p.perturb(v), v);
    }

    #[test]
    fn test_zero_strength_is_identity() {
        let p = Perturber::new(PerlinNoise::new(1, 1.0), &TerrainConfig::unperturbed());
        let v = Vec3::new(13.1, 2.0, -7.3);
        assert_eq!(p.perturb(v), v);
    }

    #[test]
    fn test_displacement_uses_strengths() {
        let config = TerrainConfig {
            cell_perturb_strength: 2.0,
            elevation_perturb_strength: 0.5,
            ..Default::default()
        };
        let p = Perturber::new(Constant(Vec4::new(1.0, 0.0, 0.75, 0.0)), &config);
        let moved = p.perturb(Vec3::ZERO);
        assert_eq!(moved, Vec3::new(2.0, -0.5, 1.0));
    }

    #[test]
    fn test_same_position_same_displacement() {
        let p = Perturber::new(PerlinNoise::new(9, 1.0), &TerrainConfig::default());
        let v = Vec3::new(40.0, 0.0, -12.0);
        // Height does not enter the noise lookup
        let a = p.perturb(v);
        let b = p.perturb(v + Vec3::Y);
        assert_eq!(a.x, b.x);
        assert_eq!(a.z, b.z);
    }
}
