//! Cube Coordinates
//!
//! Integer `(x, y, z)` hex coordinates with `x + y + z = 0`. Ordering is
//! lexicographic on `(x, y, z)`; the triangulators use it to decide which
//! cell owns a shared edge or junction.

use std::fmt;

use glam::IVec3;
use serde::{Deserialize, Serialize};

use super::grid::direction;

/// A cube coordinate on the hex grid.
///
/// The derived `Ord` compares `x`, then `y`, then `z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { x: 0, y: 0, z: 0 };

    /// Stand-in for an absent neighbor. Greater than every real coordinate.
    pub const MISSING: HexCoord = HexCoord {
        x: i32::MAX,
        y: i32::MAX,
        z: i32::MAX,
    };

    /// Creates a coordinate from all three components.
    ///
    /// Does not check the `x + y + z = 0` invariant; use [`HexCoord::is_valid`]
    /// or [`HexCoord::from_axial`] when the input is untrusted.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate from its first two components, deriving `z`.
    pub const fn from_axial(x: i32, y: i32) -> Self {
        Self { x, y, z: -x - y }
    }

    /// True when the components sum to zero.
    pub fn is_valid(&self) -> bool {
        self.x as i64 + self.y as i64 + self.z as i64 == 0
    }

    /// True for the [`HexCoord::MISSING`] sentinel.
    pub fn is_missing(&self) -> bool {
        *self == Self::MISSING
    }

    /// Coordinate shifted by a cube step.
    pub fn offset(self, step: IVec3) -> Self {
        Self::new(self.x + step.x, self.y + step.y, self.z + step.z)
    }

    /// Coordinate of the neighbor in direction `dir` (0..6).
    pub fn neighbor(self, dir: usize) -> Self {
        self.offset(direction(dir))
    }

    /// Hex distance from the origin (the ring index).
    pub fn ring(&self) -> i32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Hex distance between two coordinates.
    pub fn distance(&self, other: &HexCoord) -> i32 {
        let d = IVec3::new(self.x - other.x, self.y - other.y, self.z - other.z);
        d.x.abs().max(d.y.abs()).max(d.z.abs())
    }
}

impl From<IVec3> for HexCoord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<HexCoord> for IVec3 {
    fn from(c: HexCoord) -> Self {
        IVec3::new(c.x, c.y, c.z)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            write!(f, "(missing)")
        } else {
            write!(f, "({}, {}, {})", self.x, self.y, self.z)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_order() {
        assert!(HexCoord::new(0, 0, 0) < HexCoord::new(1, -1, 0));
        assert!(HexCoord::new(0, -1, 1) < HexCoord::new(0, 1, -1));
        assert!(HexCoord::new(-1, 5, -4) < HexCoord::new(0, -9, 9));
    }

    #[test]
    fn test_missing_is_greater_than_real() {
        let real = [
            HexCoord::ORIGIN,
            HexCoord::new(100, -50, -50),
            HexCoord::new(-7, 3, 4),
        ];
        for c in real {
            assert!(c < HexCoord::MISSING);
            assert_ne!(c, HexCoord::MISSING);
        }
        assert!(HexCoord::MISSING.is_missing());
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let c = HexCoord::from_axial(2, -1);
        for dir in 0..6 {
            let n = c.neighbor(dir);
            assert!(n.is_valid());
            assert_eq!(c.distance(&n), 1);
        }
    }

    #[test]
    fn test_validity() {
        assert!(HexCoord::from_axial(3, 4).is_valid());
        assert!(!HexCoord::new(1, 1, 1).is_valid());
        assert!(!HexCoord::MISSING.is_valid());
    }

    #[test]
    fn test_ring() {
        assert_eq!(HexCoord::ORIGIN.ring(), 0);
        assert_eq!(HexCoord::new(2, -1, -1).ring(), 2);
        assert_eq!(HexCoord::new(-3, 0, 3).ring(), 3);
    }
}
