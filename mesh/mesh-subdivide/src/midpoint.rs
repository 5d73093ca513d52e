//! Edge points and texture coordinates for the refined mesh.

// Valences are small
#![allow(clippy::cast_precision_loss)]

use mesh_types::{Point2, Point3};
use nalgebra::Vector2;

use crate::params::SubdivisionMethod;
use crate::topology::{EdgeRecord, Topology};

/// New vertices created on edges, indexed by edge id.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePoints {
    /// One position per edge.
    pub positions: Vec<Point3<f64>>,
    /// One UV per edge, if the mesh has UVs.
    pub uvs: Option<Vec<Point2<f64>>>,
}

/// Loop's edge rule for one edge.
///
/// Boundary edges take the plain midpoint. Interior edges take
/// `3/8 (P(a) + P(b)) + 1/8 (P(c) + P(d))`, where `c` and `d` are the
/// facing vertices (the two lowest ids on a non-manifold edge).
#[must_use]
pub fn loop_edge_point(edge: &EdgeRecord, positions: &[Point3<f64>]) -> Point3<f64> {
    let pa = positions[edge.a as usize].coords;
    let pb = positions[edge.b as usize].coords;
    match edge.wings() {
        Some((c, d)) => {
            let wings = positions[c as usize].coords + positions[d as usize].coords;
            Point3::from((pa + pb) * 0.375 + wings * 0.125)
        }
        None => Point3::from((pa + pb) * 0.5),
    }
}

/// Plain midpoint of an edge.
#[must_use]
pub fn edge_midpoint(edge: &EdgeRecord, positions: &[Point3<f64>]) -> Point3<f64> {
    nalgebra::center(&positions[edge.a as usize], &positions[edge.b as usize])
}

/// UV of an edge point: always the plain average of the endpoint UVs.
///
/// Texture seams make neighborhood weighting undesirable here, so interior
/// edges get no wing contribution.
#[must_use]
pub fn edge_uv(edge: &EdgeRecord, uvs: &[Point2<f64>]) -> Point2<f64> {
    nalgebra::center(&uvs[edge.a as usize], &uvs[edge.b as usize])
}

/// Compute one new vertex per edge of `topology`.
#[must_use]
pub fn synthesize_midpoints(
    topology: &Topology,
    positions: &[Point3<f64>],
    uvs: Option<&[Point2<f64>]>,
    method: SubdivisionMethod,
) -> EdgePoints {
    let edges = topology.edges();
    let positions = edges
        .iter()
        .map(|edge| match method {
            SubdivisionMethod::Loop => loop_edge_point(edge, positions),
            SubdivisionMethod::Midpoint => edge_midpoint(edge, positions),
        })
        .collect();
    let uvs = uvs.map(|uvs| edges.iter().map(|edge| edge_uv(edge, uvs)).collect());

    EdgePoints { positions, uvs }
}

/// Blend each vertex's UV halfway toward the mean UV of its neighbors.
///
/// `uv' = 1/2 uv(v) + 1/(2k) * sum uv(n)`. Isolated vertices keep their UV.
#[must_use]
pub fn smooth_uvs(topology: &Topology, uvs: &[Point2<f64>]) -> Vec<Point2<f64>> {
    uvs.iter()
        .zip(0u32..)
        .map(|(uv, v)| {
            let neighbors = topology.neighbors(v);
            if neighbors.is_empty() {
                return *uv;
            }
            let sum = neighbors
                .iter()
                .fold(Vector2::zeros(), |acc, &n| acc + uvs[n as usize].coords);
            Point2::from(uv.coords * 0.5 + sum * (0.5 / neighbors.len() as f64))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn diamond() -> (Vec<Point3<f64>>, Topology) {
        // Edge (0, 1) shared by triangles facing 2 and 3.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, -1.0, 1.0),
        ];
        let topo = Topology::build(4, &[[0, 1, 2], [1, 0, 3]]);
        (positions, topo)
    }

    #[test]
    fn test_interior_edge_rule() {
        let (positions, topo) = diamond();
        let edge = topo.edge(0, 1).unwrap();
        let p = loop_edge_point(edge, &positions);
        // 3/8 * (2, 0, 0) + 1/8 * (2, 0, 1)
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 0.0);
        assert_relative_eq!(p.z, 0.125);
    }

    #[test]
    fn test_boundary_edge_is_midpoint() {
        let (positions, topo) = diamond();
        let edge = topo.edge(1, 2).unwrap();
        assert!(edge.is_boundary());
        let p = loop_edge_point(edge, &positions);
        assert_relative_eq!(p.x, 1.5);
        assert_relative_eq!(p.y, 0.5);
    }

    #[test]
    fn test_midpoint_method_ignores_wings() {
        let (positions, topo) = diamond();
        let points = synthesize_midpoints(&topo, &positions, None, SubdivisionMethod::Midpoint);
        let id = topo.edge_id(0, 1).unwrap() as usize;
        assert_eq!(points.positions[id], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(points.positions.len(), topo.edge_count());
        assert!(points.uvs.is_none());
    }

    #[test]
    fn test_edge_uvs_are_plain_average() {
        let (positions, topo) = diamond();
        let uvs = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
            Point2::new(0.5, -1.0),
        ];
        let points = synthesize_midpoints(&topo, &positions, Some(&uvs), SubdivisionMethod::Loop);
        let id = topo.edge_id(0, 1).unwrap() as usize;
        assert_eq!(points.uvs.unwrap()[id], Point2::new(0.5, 0.0));
    }

    #[test]
    fn test_smooth_uvs() {
        let topo = Topology::build(4, &[[0, 1, 2]]);
        let uvs = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(9.0, 9.0),
        ];
        let smoothed = smooth_uvs(&topo, &uvs);
        // 0.5 * (0, 0) + 0.25 * ((1, 0) + (0, 1))
        assert_relative_eq!(smoothed[0].x, 0.25);
        assert_relative_eq!(smoothed[0].y, 0.25);
        // Unreferenced vertex keeps its UV.
        assert_eq!(smoothed[3], uvs[3]);
    }
}
