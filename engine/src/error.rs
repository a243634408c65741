//! Error Types
//!
//! Failures that can surface from loading inputs and writing meshes.
//! Triangulation itself cannot fail.

use thiserror::Error;

use crate::world::HexCoord;

/// Errors emitted by the terrain crate.
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid cube coordinate {0}: components must sum to zero")]
    InvalidCoordinate(HexCoord),
    #[error("duplicate cell coordinate {0}")]
    DuplicateCoordinate(HexCoord),
    #[error("noise texture must be at least 1x1, got {width}x{height}")]
    EmptyTexture { width: u32, height: u32 },
    #[error("mesh file too short for header")]
    FileTooShort,
    #[error("invalid magic bytes (expected HXMS)")]
    InvalidMagic,
    #[error("unsupported mesh file version: {0}")]
    UnsupportedVersion(u32),
    #[error("mesh file truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, TerrainError>;
