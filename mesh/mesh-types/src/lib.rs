//! Core mesh types for the subdivision toolkit.
//!
//! This crate provides the foundational types shared by the mesh crates:
//!
//! - [`Vertex`] - A point in 3D space with an optional texture coordinate
//! - [`IndexedMesh`] - A triangle mesh with shared, indexed vertices
//! - [`TriangleSoup`] - A de-indexed mesh where every triangle owns its corners
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Triangle soups
//!
//! Renderers and exporters typically hand over geometry as flat buffers:
//! three consecutive corners per triangle, with no vertex sharing. Corners
//! that are logically the same vertex repeat with (nearly) identical
//! coordinates. [`TriangleSoup`] is that layout, and
//! [`TriangleSoup::from_indexed`] converts shared-vertex meshes into it.
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, TriangleSoup, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//! mesh.faces.push([0, 2, 3]);
//!
//! let soup = TriangleSoup::from_indexed(&mesh)?;
//! assert_eq!(soup.triangle_count(), 2);
//! assert_eq!(soup.corner_count(), 6);
//! # Ok::<(), mesh_types::SoupLayoutError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod error;
mod mesh;
mod soup;
mod triangle;
mod vertex;

pub use bounds::{Aabb, MeshBounds};
pub use error::SoupLayoutError;
pub use mesh::IndexedMesh;
pub use soup::TriangleSoup;
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};
