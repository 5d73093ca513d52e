//! Result types for subdivision operations.

// Triangle counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::TriangleSoup;

use crate::params::SubdivisionMethod;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What one pass saw and produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PassReport {
    /// Triangles entering the pass.
    pub input_triangles: usize,
    /// Distinct vertices after welding.
    pub welded_vertices: usize,
    /// Distinct edges.
    pub edges: usize,
    /// Edges bordering a single triangle.
    pub boundary_edges: usize,
    /// Edges shared by more than two triangles.
    pub non_manifold_edges: usize,
    /// Boundary vertices with fewer than two boundary neighbors.
    pub degenerate_boundary_vertices: usize,
    /// Vertices with no neighbors.
    pub isolated_vertices: usize,
}

impl PassReport {
    /// Distinct vertices of the refined mesh: welded vertices plus one per edge.
    #[inline]
    #[must_use]
    pub const fn output_vertices(&self) -> usize {
        self.welded_vertices + self.edges
    }

    /// Check if every edge bordered exactly two triangles.
    #[inline]
    #[must_use]
    pub const fn was_closed(&self) -> bool {
        self.edges > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }
}

/// Result of mesh subdivision.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubdivisionResult {
    /// The subdivided mesh.
    pub mesh: TriangleSoup,

    /// Number of triangles in original mesh.
    pub original_triangles: usize,

    /// Number of triangles in subdivided mesh.
    pub final_triangles: usize,

    /// Number of iterations performed.
    pub iterations: u32,

    /// Subdivision method used.
    pub method: SubdivisionMethod,

    /// One report per pass, in order.
    pub passes: Vec<PassReport>,
}

impl SubdivisionResult {
    /// Get the triangle multiplication factor.
    #[must_use]
    pub fn triangle_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    /// Check if any subdivision occurred.
    #[must_use]
    pub const fn was_subdivided(&self) -> bool {
        self.iterations > 0 && self.final_triangles > self.original_triangles
    }

    /// Non-manifold edges met across all passes.
    #[must_use]
    pub fn non_manifold_edges(&self) -> usize {
        self.passes.iter().map(|p| p.non_manifold_edges).sum()
    }

    /// Degenerate boundary vertices met across all passes.
    #[must_use]
    pub fn degenerate_boundary_vertices(&self) -> usize {
        self.passes
            .iter()
            .map(|p| p.degenerate_boundary_vertices)
            .sum()
    }
}

impl std::fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subdivision ({:?}): {} → {} triangles ({:.1}x), {} iterations",
            self.method,
            self.original_triangles,
            self.final_triangles,
            self.triangle_ratio(),
            self.iterations
        )
    }
}
