//! Subdivision driver: runs the per-pass pipeline once per iteration.

use mesh_types::{IndexedMesh, TriangleSoup};
use tracing::{debug, trace, warn};

use crate::error::{SubdivideError, SubdivideResult};
use crate::midpoint::{smooth_uvs, synthesize_midpoints};
use crate::params::{SubdivideParams, SubdivisionMethod};
use crate::reposition::reposition_vertices;
use crate::result::{PassReport, SubdivisionResult};
use crate::retriangulate::{RefinedVertices, retriangulate};
use crate::topology::Topology;
use crate::weld::weld;

/// Stages of a single pass, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStage {
    /// Checking parameters and buffer layout.
    Validating,
    /// Merging corners into shared vertices.
    Welding,
    /// Building neighbor lists and the edge table.
    BuildingTopology,
    /// Moving the original vertices.
    Repositioning,
    /// Creating one vertex per edge.
    SynthesizingMidpoints,
    /// Splitting each triangle into four.
    Retriangulating,
    /// Pass finished.
    Done,
}

impl std::fmt::Display for PassStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Welding => "welding",
            Self::BuildingTopology => "building-topology",
            Self::Repositioning => "repositioning",
            Self::SynthesizingMidpoints => "synthesizing-midpoints",
            Self::Retriangulating => "retriangulating",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

fn enter(stage: PassStage) {
    trace!(%stage, "subdivision stage");
}

/// Subdivide a triangle soup using the specified parameters.
///
/// Each iteration welds the current soup, rebuilds its topology, applies the
/// vertex and edge rules, and splits every triangle into four. The output of
/// one iteration is the input of the next. With zero iterations the result
/// holds an unchanged copy of the input. An empty soup has nothing to refine,
/// so no passes run and `passes` stays empty.
///
/// # Errors
///
/// Returns an error if:
/// - The position tolerance is not a finite positive number
/// - The soup layout is malformed (partial triangle, misaligned UVs, NaN)
/// - A coordinate is too large to quantize with the welding tolerance
/// - The resulting mesh would exceed `max_triangles`
///
/// # Examples
///
/// ```
/// use mesh_types::TriangleSoup;
/// use mesh_subdivide::{subdivide_soup, SubdivideParams};
///
/// let soup = TriangleSoup::from_flat(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], None)?;
///
/// let params = SubdivideParams::loop_subdivision().with_iterations(2);
/// let result = subdivide_soup(&soup, &params)?;
///
/// // 1 * 4^2 = 16 triangles after 2 iterations
/// assert_eq!(result.final_triangles, 16);
/// assert_eq!(result.passes.len(), 2);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_soup(
    soup: &TriangleSoup,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    enter(PassStage::Validating);
    params.validate()?;
    soup.validate()?;

    let original_triangles = soup.triangle_count();

    // Check projected size
    let projected = params.expected_triangles(original_triangles);
    if projected > params.max_triangles {
        return Err(SubdivideError::MeshTooLarge {
            current: original_triangles,
            projected,
            max: params.max_triangles,
        });
    }

    debug!(
        "Subdividing soup: {} triangles, {} iterations using {:?}",
        original_triangles, params.iterations, params.method
    );

    let mut current = soup.clone();
    let mut passes = Vec::with_capacity(params.iterations.min(32) as usize);
    for i in 0..params.iterations {
        if current.is_empty() {
            debug!("Iteration {}: nothing left to refine, stopping", i + 1);
            break;
        }
        let (next, report) = subdivide_once(&current, params)?;
        debug!(
            "Iteration {}: {} triangles, {} welded vertices, {} edges",
            i + 1,
            next.triangle_count(),
            report.welded_vertices,
            report.edges
        );
        if report.non_manifold_edges > 0 {
            warn!(
                "Iteration {}: {} non-manifold edges, using the two lowest facing vertices",
                i + 1,
                report.non_manifold_edges
            );
        }
        if report.degenerate_boundary_vertices > 0 {
            warn!(
                "Iteration {}: {} boundary vertices with fewer than two boundary neighbors left in place",
                i + 1,
                report.degenerate_boundary_vertices
            );
        }
        passes.push(report);
        current = next;
    }

    Ok(SubdivisionResult {
        original_triangles,
        final_triangles: current.triangle_count(),
        mesh: current,
        iterations: params.iterations,
        method: params.method,
        passes,
    })
}

/// Subdivide an indexed mesh by first expanding it into a triangle soup.
///
/// # Errors
///
/// Returns [`SubdivideError::Layout`] if a face references a missing vertex,
/// and otherwise the same errors as [`subdivide_soup`].
pub fn subdivide_indexed(
    mesh: &IndexedMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    let soup = TriangleSoup::from_indexed(mesh)?;
    subdivide_soup(&soup, params)
}

/// Run exactly one pass over `soup`.
///
/// # Errors
///
/// Returns an error if the tolerance or the soup layout is invalid. The
/// triangle ceiling is not checked here.
pub fn subdivide_once(
    soup: &TriangleSoup,
    params: &SubdivideParams,
) -> SubdivideResult<(TriangleSoup, PassReport)> {
    enter(PassStage::Welding);
    let welded = weld(soup, params.position_tolerance)?;

    enter(PassStage::BuildingTopology);
    let topology = Topology::build(welded.vertex_count(), &welded.triangles);

    enter(PassStage::Repositioning);
    let mut report = PassReport {
        input_triangles: welded.triangles.len(),
        welded_vertices: welded.vertex_count(),
        edges: topology.edge_count(),
        boundary_edges: topology.boundary_edge_count(),
        non_manifold_edges: topology.non_manifold_edge_count(),
        ..PassReport::default()
    };
    let vertex_positions = match params.method {
        SubdivisionMethod::Loop => {
            let moved = reposition_vertices(&topology, &welded.positions);
            report.isolated_vertices = moved.isolated;
            report.degenerate_boundary_vertices = moved.degenerate_boundary;
            moved.positions
        }
        SubdivisionMethod::Midpoint => welded.positions.clone(),
    };
    let vertex_uvs = welded.uvs.as_deref().map(|uvs| {
        if params.uv_smooth {
            smooth_uvs(&topology, uvs)
        } else {
            uvs.to_vec()
        }
    });

    enter(PassStage::SynthesizingMidpoints);
    let edge_points = synthesize_midpoints(
        &topology,
        &welded.positions,
        welded.uvs.as_deref(),
        params.method,
    );

    enter(PassStage::Retriangulating);
    let refined = RefinedVertices {
        vertex_positions,
        vertex_uvs,
        edge_points,
    };
    let output = retriangulate(&welded.triangles, &topology, &refined);

    enter(PassStage::Done);
    Ok((output, report))
}
