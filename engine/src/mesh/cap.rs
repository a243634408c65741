//! Cell Caps
//!
//! The flat hexagonal top of a cell, fanned from its center.

use glam::Vec3;

use super::assembler::TriangleSink;
use crate::world::cell::Cell;
use crate::world::grid::corner;

/// Triangles in every cap.
pub const CAP_TRIANGLES: usize = 6;

/// Emits the six cap triangles of `cell` in its own color.
pub fn triangulate_cap(cell: &Cell, out: &mut impl TriangleSink) -> usize {
    let center = cell.base_position();
    for i in 0..6 {
        out.add_triangle(center, center + corner(i), center + corner(i + 1), cell.color);
    }
    CAP_TRIANGLES
}

/// Unperturbed position a cell is moved to once its cap is built.
pub fn lifted_center(cell: &Cell, cap_lift: f32) -> Vec3 {
    cell.base_position() + Vec3::Y * cap_lift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::types::face_normal;
    use crate::world::coords::HexCoord;
    use crate::world::grid::{LEVEL_HEIGHT, OUTER_RADIUS};

    #[test]
    fn test_cap_is_flat_hexagon() {
        let cell = Cell::new(HexCoord::from_axial(2, -1), 3, [0.2, 0.4, 0.6, 1.0]);
        let mut tris: Vec<[Vec3; 3]> = Vec::new();
        assert_eq!(triangulate_cap(&cell, &mut tris), CAP_TRIANGLES);
        assert_eq!(tris.len(), 6);

        let center = cell.base_position();
        for [a, b, c] in tris {
            assert_eq!(a, center);
            assert!(((b - center).length() - OUTER_RADIUS).abs() < 1e-5);
            assert!((c.y - 3.0 * LEVEL_HEIGHT).abs() < 1e-6);
            assert!(face_normal(a, b, c).y > 0.0);
        }
    }

    #[test]
    fn test_lifted_center() {
        let cell = Cell::new(HexCoord::ORIGIN, 1, [1.0; 4]);
        let lifted = lifted_center(&cell, 0.1);
        assert!((lifted.y - (LEVEL_HEIGHT + 0.1)).abs() < 1e-6);
        assert_eq!(lifted.x, 0.0);
    }
}
