//! One-to-four triangle split into a fresh soup.

use mesh_types::{Point2, Point3, TriangleSoup};

use crate::midpoint::EdgePoints;
use crate::topology::Topology;

/// Vertex data of the refined mesh: moved originals plus edge points.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinedVertices {
    /// New positions of the original vertices, by vertex id.
    pub vertex_positions: Vec<Point3<f64>>,
    /// UVs of the original vertices, by vertex id.
    pub vertex_uvs: Option<Vec<Point2<f64>>>,
    /// Points created on edges, by edge id.
    pub edge_points: EdgePoints,
}

/// Split every triangle into four and write the result as a soup.
///
/// For a triangle `(a, b, c)` with edge points `ab`, `bc`, `ca` the output
/// is `(a, ab, ca)`, `(b, bc, ab)`, `(c, ca, bc)`, `(ab, bc, ca)`, all with
/// the parent's winding. Corner data is copied, never shared.
///
/// `topology` must have been built from `triangles`.
#[must_use]
pub fn retriangulate(
    triangles: &[[u32; 3]],
    topology: &Topology,
    refined: &RefinedVertices,
) -> TriangleSoup {
    debug_assert_eq!(
        triangles.len(),
        topology.triangle_edges().len(),
        "topology was built from a different triangle list"
    );
    let edge_uvs = refined.edge_points.uvs.as_deref();
    let vertex_uvs = refined.vertex_uvs.as_deref();
    let with_uvs = edge_uvs.is_some() && vertex_uvs.is_some();
    let mut soup = TriangleSoup::with_capacity(triangles.len() * 4, with_uvs);

    for (&[a, b, c], &[ab, bc, ca]) in triangles.iter().zip(topology.triangle_edges()) {
        let v = |id: u32| refined.vertex_positions[id as usize];
        let e = |id: u32| refined.edge_points.positions[id as usize];

        let uv = match (vertex_uvs, edge_uvs) {
            (Some(vuv), Some(euv)) => {
                let (ua, ub, uc) = (vuv[a as usize], vuv[b as usize], vuv[c as usize]);
                let (uab, ubc, uca) = (euv[ab as usize], euv[bc as usize], euv[ca as usize]);
                Some([
                    [ua, uab, uca],
                    [ub, ubc, uab],
                    [uc, uca, ubc],
                    [uab, ubc, uca],
                ])
            }
            _ => None,
        };

        let corners = [
            [v(a), e(ab), e(ca)],
            [v(b), e(bc), e(ab)],
            [v(c), e(ca), e(bc)],
            [e(ab), e(bc), e(ca)],
        ];

        for (i, tri) in corners.into_iter().enumerate() {
            soup.push_triangle(tri, uv.map(|uv| uv[i]));
        }
    }

    soup
}
