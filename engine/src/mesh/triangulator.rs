//! Terrain Triangulator
//!
//! Turns a [`CellStore`] into one colored mesh. For every cell, in store
//! order:
//!
//! 1. the edges it owns (one per side, shared edges go to the smaller
//!    coordinate)
//! 2. the nodes it owns (one per corner, shared nodes go to the smallest of
//!    the three coordinates)
//! 3. its cap, after which the cell's stored position is lifted and perturbed
//!
//! Edge and node geometry only ever reads base positions, so the output does
//! not depend on the order in which caps move cells. Positions are reset at
//! the start of each pass, which makes repeated passes identical.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::assembler::MeshAssembler;
use super::cap::{lifted_center, triangulate_cap};
use super::edge::{EdgeKind, EdgeRecord, owns_edge, triangulate_edge};
use super::noise::NoiseSource;
use super::node::{NodeKind, NodeRecord, owns_node, triangulate_node};
use super::perturb::Perturber;
use super::types::Mesh;
use crate::config::TerrainConfig;
use crate::world::cell::CellStore;

/// What one pass emitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangulationReport {
    pub edges: Vec<EdgeRecord>,
    pub nodes: Vec<NodeRecord>,
    pub caps: usize,
}

impl TriangulationReport {
    pub fn triangle_count(&self) -> usize {
        let edges: usize = self.edges.iter().map(|e| e.triangles).sum();
        let nodes: usize = self.nodes.iter().map(|n| n.triangles).sum();
        edges + nodes + self.caps * super::cap::CAP_TRIANGLES
    }

    pub fn node_kinds(&self) -> HashMap<NodeKind, usize> {
        let mut counts = HashMap::new();
        for node in &self.nodes {
            *counts.entry(node.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Edge counts as `(flat, stairs, cliffs)`.
    pub fn edge_kinds(&self) -> (usize, usize, usize) {
        self.edges.iter().fold((0, 0, 0), |(f, s, c), e| match e.kind {
            EdgeKind::Flat => (f + 1, s, c),
            EdgeKind::Stairs { .. } => (f, s + 1, c),
            EdgeKind::Cliff { .. } => (f, s, c + 1),
        })
    }
}

/// Builds terrain meshes with fixed settings and noise.
pub struct Triangulator<N> {
    config: TerrainConfig,
    perturber: Perturber<N>,
}

impl<N: NoiseSource> Triangulator<N> {
    pub fn new(noise: N, config: TerrainConfig) -> Self {
        let perturber = Perturber::new(noise, &config);
        Self { config, perturber }
    }

    /// Triangulates the store, updating each cell's stored position.
    pub fn triangulate(&self, store: &mut CellStore) -> Mesh {
        self.triangulate_with_report(store).0
    }

    /// Same as [`Triangulator::triangulate`], also returning what was emitted.
    pub fn triangulate_with_report(&self, store: &mut CellStore) -> (Mesh, TriangulationReport) {
        store.reset_positions();

        let mut out = MeshAssembler::new(&self.perturber);
        let mut report = TriangulationReport::default();
        let connector = self.config.connector_color;

        for slot in 0..store.len() {
            let cell = *store.at(slot);

            for dir in 0..6 {
                if owns_edge(store, cell.coord, dir) {
                    let edge = triangulate_edge(store, &cell, dir, connector, &mut out);
                    tracing::trace!(coord = %cell.coord, dir, kind = ?edge.kind, "edge");
                    report.edges.push(edge);
                }
            }

            for dir in 0..6 {
                if owns_node(store, cell.coord, dir) {
                    let node = triangulate_node(store, &cell, dir, connector, &mut out);
                    tracing::trace!(coord = %cell.coord, dir, kind = ?node.kind, "node");
                    report.nodes.push(node);
                }
            }

            triangulate_cap(&cell, &mut out);
            report.caps += 1;
            store.at_mut(slot).position = self.perturber.perturb(lifted_center(&cell, self.config.cap_lift));
        }

        let mesh = out.finish();
        tracing::debug!(
            cells = store.len(),
            edges = report.edges.len(),
            nodes = report.nodes.len(),
            triangles = mesh.triangle_count(),
            "triangulated terrain"
        );
        (mesh, report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use glam::Vec3;

    use super::*;
    use crate::mesh::noise::{FlatNoise, PerlinNoise};
    use crate::world::cell::{Cell, WHITE};
    use crate::world::coords::HexCoord;
    use crate::world::grid::LEVEL_HEIGHT;
    use crate::world::placement::{PlacementConfig, generate_cells};

    fn flat_triangulator() -> Triangulator<FlatNoise> {
        Triangulator::new(FlatNoise, TerrainConfig::default())
    }

    /// Filled hexagon of the given radius at a constant elevation.
    fn hexagon(radius: i32, elevation: i32) -> CellStore {
        let mut store = CellStore::new();
        for x in -radius..=radius {
            for y in -radius..=radius {
                let coord = HexCoord::from_axial(x, y);
                if coord.ring() <= radius {
                    store.insert(Cell::new(coord, elevation, WHITE));
                }
            }
        }
        store
    }

    #[test]
    fn test_empty_store() {
        let mut store = CellStore::new();
        let (mesh, report) = flat_triangulator().triangulate_with_report(&mut store);
        assert!(mesh.is_empty());
        assert_eq!(report, TriangulationReport::default());
    }

    #[test]
    fn test_single_cell() {
        let mut store = CellStore::from_cells([Cell::new(HexCoord::ORIGIN, 0, WHITE)]);
        let (mesh, report) = flat_triangulator().triangulate_with_report(&mut store);
        // Six boundary cliffs, six lone nodes, one cap
        assert_eq!(report.edges.len(), 6);
        assert!(report.edges.iter().all(|e| e.is_boundary()));
        assert_eq!(report.nodes.len(), 6);
        assert_eq!(report.caps, 1);
        assert_eq!(mesh.triangle_count(), report.triangle_count());
        assert_eq!(mesh.triangle_count(), 6 * 2 + 6 + 6);
    }

    #[test]
    fn test_each_edge_and_node_emitted_once() {
        let mut store = hexagon(2, 0);
        let (_, report) = flat_triangulator().triangulate_with_report(&mut store);

        let mut edges = HashSet::new();
        for e in &report.edges {
            let key = if e.is_boundary() {
                (e.owner, e.owner.neighbor(e.direction))
            } else {
                (e.owner.min(e.neighbor), e.owner.max(e.neighbor))
            };
            assert!(edges.insert(key), "edge emitted twice: {key:?}");
        }
        // 19 cells: 6 sides each, interior sides shared
        let interior = report.edges.iter().filter(|e| !e.is_boundary()).count();
        let boundary = report.edges.len() - interior;
        assert_eq!(interior * 2 + boundary, 19 * 6);

        let mut nodes = HashSet::new();
        for n in &report.nodes {
            assert!(n.cells[0] < n.cells[1] && n.cells[0] < n.cells[2]);
            if n.cells.iter().all(|c| !c.is_missing()) {
                let mut cells = n.cells;
                cells.sort();
                assert!(nodes.insert(cells), "node emitted twice: {cells:?}");
            }
        }
        // Every corner of every cell is covered: 19 cells, 6 corners each
        let shared = nodes.len();
        let boundary = report.nodes.len() - shared;
        let two_cell = report
            .nodes
            .iter()
            .filter(|n| n.cells.iter().filter(|c| c.is_missing()).count() == 1)
            .count();
        let one_cell = boundary - two_cell;
        assert_eq!(shared * 3 + two_cell * 2 + one_cell, 19 * 6);
    }

    #[test]
    fn test_flat_grid_faces_up() {
        let mut store = hexagon(2, 1);
        let triangulator = Triangulator::new(FlatNoise, TerrainConfig::unperturbed());
        let (mesh, report) = triangulator.triangulate_with_report(&mut store);
        assert_eq!(report.edge_kinds().1, 0);

        for (tri, chunk) in mesh.triangles().zip(mesh.vertices.chunks_exact(3)) {
            let on_top = tri.iter().all(|p| (p.y - LEVEL_HEIGHT).abs() < 1e-5);
            if on_top {
                assert!(chunk[0].normal().y > 0.999);
            }
        }
        // Flat inside, and far above the boundary sentinel
        let kinds = report.node_kinds();
        assert!(kinds.keys().all(|k| *k == NodeKind::Simple));
    }

    #[test]
    fn test_indices_valid() {
        let mut store = generate_cells(&PlacementConfig::default());
        let triangulator = Triangulator::new(PerlinNoise::new(3, 1.0), TerrainConfig::default());
        let mesh = triangulator.triangulate(&mut store);
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
        assert!(mesh.vertices.iter().all(|v| v.position().is_finite()));
    }

    #[test]
    fn test_repeat_pass_is_identical() {
        let mut store = generate_cells(&PlacementConfig::default());
        let triangulator = Triangulator::new(PerlinNoise::new(11, 1.0), TerrainConfig::default());
        let first = triangulator.triangulate(&mut store);
        let positions: Vec<Vec3> = store.iter().map(|c| c.position).collect();
        let second = triangulator.triangulate(&mut store);
        assert_eq!(first, second);
        assert_eq!(positions, store.iter().map(|c| c.position).collect::<Vec<_>>());
    }

    #[test]
    fn test_cap_moves_cell_position() {
        let mut store = CellStore::from_cells([Cell::new(HexCoord::ORIGIN, 2, WHITE)]);
        let config = TerrainConfig {
            cap_lift: 0.25,
            ..TerrainConfig::default()
        };
        Triangulator::new(FlatNoise, config).triangulate(&mut store);
        let cell = store.at(0);
        assert!((cell.position.y - (2.0 * LEVEL_HEIGHT + 0.25)).abs() < 1e-6);
        assert_eq!(cell.base_position().y, 2.0 * LEVEL_HEIGHT);
    }

    #[test]
    fn test_stairs_between_two_cells() {
        let mut store = CellStore::from_cells([
            Cell::new(HexCoord::ORIGIN, 0, WHITE),
            Cell::new(HexCoord::ORIGIN.neighbor(1), 2, WHITE),
        ]);
        let (_, report) = flat_triangulator().triangulate_with_report(&mut store);
        let shared: Vec<_> = report.edges.iter().filter(|e| !e.is_boundary()).collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].kind, EdgeKind::Stairs { steps: 2 });
        assert_eq!(shared[0].triangles, 6);
    }

    fn junction(third: i32) -> NodeRecord {
        let mut store = CellStore::from_cells([
            Cell::new(HexCoord::new(0, 0, 0), 0, WHITE),
            Cell::new(HexCoord::new(1, 0, -1), 0, WHITE),
            Cell::new(HexCoord::new(0, 1, -1), third, WHITE),
        ]);
        let (_, report) = flat_triangulator().triangulate_with_report(&mut store);
        let shared: Vec<_> = report
            .nodes
            .iter()
            .filter(|n| n.cells.iter().all(|c| !c.is_missing()))
            .copied()
            .collect();
        assert_eq!(shared.len(), 1);
        shared[0]
    }

    #[test]
    fn test_junction_two_low_one_high() {
        let node = junction(2);
        assert_eq!(node.cells[0], HexCoord::ORIGIN);
        assert_eq!(node.kind, NodeKind::Stairs2To1);
        assert_eq!(node.triangles, 5);
    }

    #[test]
    fn test_junction_far_third_is_simple() {
        let node = junction(10);
        assert_eq!(node.kind, NodeKind::Simple);
        assert_eq!(node.triangles, 1);
    }

    #[test]
    fn test_connector_color() {
        let mut store = CellStore::from_cells([Cell::new(HexCoord::ORIGIN, 0, [0.0, 0.0, 1.0, 1.0])]);
        let config = TerrainConfig {
            connector_color: [1.0, 0.0, 0.0, 1.0],
            ..TerrainConfig::default()
        };
        let mesh = Triangulator::new(FlatNoise, config).triangulate(&mut store);
        let colors = mesh.colors();
        assert!(colors.contains(&[1.0, 0.0, 0.0, 1.0]));
        assert!(colors.contains(&[0.0, 0.0, 1.0, 1.0]));
        // Cap comes last for a single cell
        assert!(colors[colors.len() - 18..].iter().all(|c| *c == [0.0, 0.0, 1.0, 1.0]));
    }
}
