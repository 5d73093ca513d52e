//! Loop vertex rules: new positions for the vertices a pass starts with.

// Valences are small
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use mesh_types::Point3;
use nalgebra::Vector3;

use crate::topology::Topology;

/// Which rule moved (or kept) a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexRule {
    /// No neighbors; position passes through.
    Isolated,
    /// All incident edges are interior; Loop's interior stencil.
    Interior,
    /// On the boundary with two boundary neighbors; boundary stencil.
    Boundary,
    /// On the boundary with fewer than two boundary neighbors; kept in place.
    DegenerateBoundary,
}

/// New positions for every vertex, plus how many fell back to pass-through.
#[derive(Debug, Clone, PartialEq)]
pub struct Repositioned {
    /// One position per input vertex, same ids.
    pub positions: Vec<Point3<f64>>,
    /// Vertices with no neighbors.
    pub isolated: usize,
    /// Boundary vertices with fewer than two boundary neighbors.
    pub degenerate_boundary: usize,
}

/// Loop's interior weight with Warren's simplification.
///
/// `3/16` for valence 3, `3/(8k)` otherwise; `0` for an isolated vertex.
///
/// # Example
///
/// ```
/// use mesh_subdivide::loop_beta;
///
/// assert_eq!(loop_beta(3), 3.0 / 16.0);
/// assert_eq!(loop_beta(6), 1.0 / 16.0);
/// ```
#[inline]
#[must_use]
pub fn loop_beta(valence: usize) -> f64 {
    match valence {
        0 => 0.0,
        3 => 3.0 / 16.0,
        k => 3.0 / (8.0 * k as f64),
    }
}

/// Compute the smoothed position of vertex `v`.
///
/// Boundary vertices (any incident edge bordering a single triangle) use
/// `3/4 P(v) + 1/8 P(n1) + 1/8 P(n2)` over their two lowest-id boundary
/// neighbors. Interior vertices use `(1 - k beta) P(v) + beta * sum P(n)`.
#[must_use]
pub fn reposition_vertex(
    v: u32,
    topology: &Topology,
    positions: &[Point3<f64>],
) -> (Point3<f64>, VertexRule) {
    let p = positions[v as usize];
    let neighbors = topology.neighbors(v);
    if neighbors.is_empty() {
        return (p, VertexRule::Isolated);
    }

    if topology.is_boundary_vertex(v) {
        let mut boundary = topology.boundary_neighbors(v);
        return match (boundary.next(), boundary.next()) {
            (Some(n1), Some(n2)) => {
                let sum = positions[n1 as usize].coords + positions[n2 as usize].coords;
                (
                    Point3::from(p.coords * 0.75 + sum * 0.125),
                    VertexRule::Boundary,
                )
            }
            _ => (p, VertexRule::DegenerateBoundary),
        };
    }

    let k = neighbors.len();
    let beta = loop_beta(k);
    let alpha = (k as f64).mul_add(-beta, 1.0);
    let sum = neighbors
        .iter()
        .fold(Vector3::zeros(), |acc, &n| acc + positions[n as usize].coords);

    (
        Point3::from(p.coords * alpha + sum * beta),
        VertexRule::Interior,
    )
}

/// Apply [`reposition_vertex`] to every vertex of the topology.
#[must_use]
pub fn reposition_vertices(topology: &Topology, positions: &[Point3<f64>]) -> Repositioned {
    let mut out = Repositioned {
        positions: Vec::with_capacity(positions.len()),
        isolated: 0,
        degenerate_boundary: 0,
    };

    for v in 0..positions.len() as u32 {
        let (p, rule) = reposition_vertex(v, topology, positions);
        match rule {
            VertexRule::Isolated => out.isolated += 1,
            VertexRule::DegenerateBoundary => out.degenerate_boundary += 1,
            VertexRule::Interior | VertexRule::Boundary => {}
        }
        out.positions.push(p);
    }

    out
}
