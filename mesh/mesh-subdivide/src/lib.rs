//! Loop subdivision of triangle soups.
//!
//! A soup is a flat list of triangle corners with no shared vertices. Each
//! pass of this crate rebuilds the sharing itself:
//!
//! 1. **Weld** corners that land in the same tolerance cell
//! 2. **Build topology**: neighbor lists and an edge table
//! 3. **Reposition** the welded vertices with Loop's vertex rules
//! 4. **Synthesize** one new vertex per edge
//! 5. **Retriangulate** each triangle into four, written out as a new soup
//!
//! Boundary edges and vertices use the boundary rules, so open meshes keep
//! their outline. [`SubdivisionMethod::Midpoint`] skips the smoothing rules
//! and only refines.
//!
//! # Examples
//!
//! One Loop pass over a single triangle:
//!
//! ```
//! use mesh_types::TriangleSoup;
//! use mesh_subdivide::{subdivide_soup, SubdivideParams};
//!
//! let soup = TriangleSoup::from_flat(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], None)?;
//! let result = subdivide_soup(&soup, &SubdivideParams::default())?;
//!
//! assert_eq!(result.final_triangles, 4);
//! assert_eq!(result.passes[0].output_vertices(), 6);
//! // Corners follow the boundary rule: 3/4 P + 1/8 of each boundary neighbor.
//! assert!((result.mesh.positions[0].x - 0.125).abs() < 1e-12);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```
//!
//! Indexed meshes are expanded into a soup first:
//!
//! ```
//! use mesh_types::{IndexedMesh, Vertex};
//! use mesh_subdivide::{subdivide_indexed, SubdivideParams};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! let params = SubdivideParams::midpoint().with_iterations(2);
//! let result = subdivide_indexed(&mesh, &params)?;
//!
//! // 1 * 4^2 = 16 triangles after 2 iterations
//! assert_eq!(result.final_triangles, 16);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod midpoint;
mod params;
mod reposition;
mod result;
mod retriangulate;
mod subdivide;
mod topology;
mod weld;

pub use error::{SubdivideError, SubdivideResult};
pub use midpoint::{
    EdgePoints, edge_midpoint, edge_uv, loop_edge_point, smooth_uvs, synthesize_midpoints,
};
pub use params::{DEFAULT_POSITION_TOLERANCE, SubdivideParams, SubdivisionMethod};
pub use reposition::{Repositioned, VertexRule, loop_beta, reposition_vertex, reposition_vertices};
pub use result::{PassReport, SubdivisionResult};
pub use retriangulate::{RefinedVertices, retriangulate};
pub use subdivide::{PassStage, subdivide_indexed, subdivide_once, subdivide_soup};
pub use topology::{EdgeKey, EdgeRecord, Topology, normalize_edge};
pub use weld::{CellKey, WeldedMesh, cell_key, weld};
