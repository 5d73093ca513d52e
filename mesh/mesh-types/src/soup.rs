//! De-indexed triangle meshes.

use nalgebra::{Point2, Point3};

use crate::{Aabb, IndexedMesh, MeshBounds, SoupLayoutError, Triangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle soup: every three consecutive corners form one triangle.
///
/// Corners are never shared. Two triangles that meet at a vertex each store
/// their own copy of it, possibly with slightly different coordinates.
///
/// `uvs`, when present, is aligned corner for corner with `positions`.
/// The fields are public, so a soup can be in an inconsistent state;
/// [`validate`](Self::validate) checks the layout.
///
/// # Example
///
/// ```
/// use mesh_types::TriangleSoup;
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let uvs = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
///
/// let soup = TriangleSoup::from_flat(&positions, Some(&uvs))?;
/// assert_eq!(soup.triangle_count(), 1);
/// assert!(soup.has_uvs());
/// assert_eq!(soup.to_flat_positions(), positions);
/// # Ok::<(), mesh_types::SoupLayoutError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleSoup {
    /// Corner positions, three per triangle.
    pub positions: Vec<Point3<f64>>,

    /// Corner texture coordinates, if the mesh carries them.
    pub uvs: Option<Vec<Point2<f64>>>,
}

impl TriangleSoup {
    /// Create an empty soup.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            uvs: None,
        }
    }

    /// Create an empty soup with room for `triangles` triangles.
    #[must_use]
    pub fn with_capacity(triangles: usize, with_uvs: bool) -> Self {
        let corners = triangles * 3;
        Self {
            positions: Vec::with_capacity(corners),
            uvs: with_uvs.then(|| Vec::with_capacity(corners)),
        }
    }

    /// Build a soup from flat `[x0, y0, z0, x1, ...]` and `[u0, v0, u1, ...]` buffers.
    ///
    /// # Errors
    ///
    /// Returns a [`SoupLayoutError`] if either buffer has the wrong arity,
    /// the corners do not group into triangles, the buffers are not
    /// corner-aligned, or a position or UV is not finite.
    pub fn from_flat(positions: &[f64], uvs: Option<&[f64]>) -> Result<Self, SoupLayoutError> {
        if positions.len() % 3 != 0 {
            return Err(SoupLayoutError::PositionArity {
                len: positions.len(),
            });
        }
        if let Some(uvs) = uvs {
            if uvs.len() % 2 != 0 {
                return Err(SoupLayoutError::UvArity { len: uvs.len() });
            }
        }

        let soup = Self {
            positions: positions
                .chunks_exact(3)
                .map(|c| Point3::new(c[0], c[1], c[2]))
                .collect(),
            uvs: uvs.map(|uvs| {
                uvs.chunks_exact(2)
                    .map(|c| Point2::new(c[0], c[1]))
                    .collect()
            }),
        };
        soup.validate()?;
        Ok(soup)
    }

    /// Expand an indexed mesh into a soup, one corner per face slot.
    ///
    /// UVs are carried over only if every vertex of the mesh has one.
    ///
    /// # Errors
    ///
    /// Returns [`SoupLayoutError::IndexOutOfRange`] if a face references a
    /// vertex the mesh does not have.
    pub fn from_indexed(mesh: &IndexedMesh) -> Result<Self, SoupLayoutError> {
        let with_uvs = mesh.has_uvs();
        let mut soup = Self::with_capacity(mesh.faces.len(), with_uvs);

        for (face_idx, face) in mesh.faces.iter().enumerate() {
            for &index in face {
                let vertex = mesh.vertices.get(index as usize).ok_or(
                    SoupLayoutError::IndexOutOfRange {
                        face: face_idx,
                        index,
                        vertex_count: mesh.vertices.len(),
                    },
                )?;
                soup.positions.push(vertex.position);
                if let (Some(uvs), Some(uv)) = (soup.uvs.as_mut(), vertex.uv) {
                    uvs.push(uv);
                }
            }
        }

        Ok(soup)
    }

    /// Check that the buffers describe whole, finite triangles.
    ///
    /// # Errors
    ///
    /// Returns the first layout problem found.
    pub fn validate(&self) -> Result<(), SoupLayoutError> {
        let corners = self.positions.len();
        if corners % 3 != 0 {
            return Err(SoupLayoutError::PartialTriangle { corners });
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != corners {
                return Err(SoupLayoutError::UvCountMismatch {
                    corners,
                    uvs: uvs.len(),
                });
            }
        }
        if let Some(corner) = self
            .positions
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(SoupLayoutError::NonFinitePosition { corner });
        }
        if let Some(corner) = self
            .uvs
            .iter()
            .flatten()
            .position(|uv| !uv.coords.iter().all(|c| c.is_finite()))
        {
            return Err(SoupLayoutError::NonFiniteUv { corner });
        }
        Ok(())
    }

    /// Number of corners (three per triangle).
    #[inline]
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of whole triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Check if the soup has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Check if texture coordinates are present.
    #[inline]
    #[must_use]
    pub const fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }

    /// Append one triangle.
    ///
    /// `uvs` is ignored if the soup does not carry texture coordinates.
    pub fn push_triangle(&mut self, corners: [Point3<f64>; 3], uvs: Option<[Point2<f64>; 3]>) {
        self.positions.extend_from_slice(&corners);
        if let (Some(dst), Some(src)) = (self.uvs.as_mut(), uvs) {
            dst.extend_from_slice(&src);
        }
    }

    /// Iterate over the triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|c| Triangle::new(c[0], c[1], c[2]))
    }

    /// Flatten positions to `[x0, y0, z0, x1, ...]`.
    #[must_use]
    pub fn to_flat_positions(&self) -> Vec<f64> {
        self.positions
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }

    /// Flatten texture coordinates to `[u0, v0, u1, ...]`.
    #[must_use]
    pub fn to_flat_uvs(&self) -> Option<Vec<f64>> {
        self.uvs
            .as_ref()
            .map(|uvs| uvs.iter().flat_map(|uv| [uv.x, uv.y]).collect())
    }
}

impl MeshBounds for TriangleSoup {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter())
    }
}
