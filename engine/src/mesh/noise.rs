//! Noise Sources
//!
//! The triangulator perturbs vertices through a [`NoiseSource`]: any smooth,
//! deterministic function from a planar position to four values in `[0, 1]`.
//!
//! - [`FlatNoise`] returns 0.5 everywhere, which displaces nothing
//! - [`PerlinNoise`] evaluates four seeded Perlin fields directly
//! - [`NoiseTexture`] samples an RGBA texture bilinearly with repeat wrapping,
//!   either loaded from an image or baked from [`PerlinNoise`]

use std::path::Path;

use glam::{Vec2, Vec4};
use noise::{NoiseFn, Perlin};

use crate::error::{Result, TerrainError};

/// Deterministic 4-channel noise over the XZ plane.
pub trait NoiseSource {
    /// Sample at a planar position. Every component must lie in `[0, 1]`.
    fn sample(&self, x: f32, z: f32) -> Vec4;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    fn sample(&self, x: f32, z: f32) -> Vec4 {
        (**self).sample(x, z)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn sample(&self, x: f32, z: f32) -> Vec4 {
        (**self).sample(x, z)
    }
}

/// Neutral noise: every channel is 0.5, so perturbation is the identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatNoise;

impl NoiseSource for FlatNoise {
    fn sample(&self, _x: f32, _z: f32) -> Vec4 {
        Vec4::splat(0.5)
    }
}

// ============================================================================
// PERLIN
// ============================================================================

/// Four independent Perlin fields, one per channel, remapped to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    channels: [Perlin; 4],
    frequency: f32,
}

impl PerlinNoise {
    /// `frequency` multiplies the incoming coordinates before evaluation.
    pub fn new(seed: u32, frequency: f32) -> Self {
        Self {
            channels: [
                Perlin::new(seed),
                Perlin::new(seed.wrapping_add(1)),
                Perlin::new(seed.wrapping_add(2)),
                Perlin::new(seed.wrapping_add(3)),
            ],
            frequency,
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f32, z: f32) -> Vec4 {
        let p = [(x * self.frequency) as f64, (z * self.frequency) as f64];
        let channel = |perlin: &Perlin| ((perlin.get(p) as f32) * 0.5 + 0.5).clamp(0.0, 1.0);
        Vec4::new(
            channel(&self.channels[0]),
            channel(&self.channels[1]),
            channel(&self.channels[2]),
            channel(&self.channels[3]),
        )
    }
}

// ============================================================================
// TEXTURE
// ============================================================================

/// RGBA float texture sampled in UV space with bilinear filtering.
///
/// UVs wrap, so any planar position maps into the texture.
#[derive(Clone, Debug)]
pub struct NoiseTexture {
    width: u32,
    height: u32,
    texels: Vec<Vec4>,
}

impl NoiseTexture {
    /// Wraps raw texels, row-major starting at `v = 0`.
    pub fn from_texels(width: u32, height: u32, texels: Vec<Vec4>) -> Result<Self> {
        if width == 0 || height == 0 || texels.len() != (width * height) as usize {
            return Err(TerrainError::EmptyTexture { width, height });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Loads any image format the `image` crate understands.
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)?.to_rgba32f();
        let (width, height) = img.dimensions();
        let texels = img.pixels().map(|p| Vec4::from_array(p.0)).collect();
        Self::from_texels(width, height, texels)
    }

    /// Bakes a texture from Perlin noise over one period of `size` texels.
    pub fn bake(size: u32, seed: u32) -> Result<Self> {
        let perlin = PerlinNoise::new(seed, 8.0 / size.max(1) as f32);
        let texels = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .map(|(x, y)| perlin.sample(x as f32, y as f32))
            .collect();
        Self::from_texels(size, size, texels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn texel(&self, x: i64, y: i64) -> Vec4 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.texels[y * self.width as usize + x]
    }

    /// Bilinear sample at UV `(u, v)` with texel centers at half-integers.
    pub fn sample_bilinear(&self, uv: Vec2) -> Vec4 {
        let px = uv.x * self.width as f32 - 0.5;
        let py = uv.y * self.height as f32 - 0.5;
        let x0 = px.floor();
        let y0 = py.floor();
        let tx = px - x0;
        let ty = py - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), tx);
        let bottom = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), tx);
        top.lerp(bottom, ty)
    }
}

impl NoiseSource for NoiseTexture {
    fn sample(&self, x: f32, z: f32) -> Vec4 {
        self.sample_bilinear(Vec2::new(x, z))
    }
}
