//! Corner welding: turns a triangle soup into shared, indexed vertices.

// Vertex ids are u32
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use mesh_types::{Point2, Point3, TriangleSoup};

use crate::error::{SubdivideError, SubdivideResult};

/// Quantized position used as the welding key: the bit patterns of the
/// rounded per-axis quotients.
pub type CellKey = (u64, u64, u64);

/// A soup after welding: unique vertices plus triangles that index them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeldedMesh {
    /// Welded vertex positions, in first-seen order.
    pub positions: Vec<Point3<f64>>,

    /// Welded vertex UVs (first-seen corner wins), if the soup had UVs.
    pub uvs: Option<Vec<Point2<f64>>>,

    /// Input triangles re-expressed with welded ids, winding preserved.
    pub triangles: Vec<[u32; 3]>,

    /// Welded id of every input corner.
    pub corner_map: Vec<u32>,
}

impl WeldedMesh {
    /// Number of welded vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of input corners that were merged into an earlier vertex.
    #[must_use]
    pub fn merged_corners(&self) -> usize {
        self.corner_map.len() - self.positions.len()
    }
}

/// Quantize a position onto the welding grid.
///
/// Each axis is divided by `eps` and rounded to the nearest integer, so two
/// corners weld iff they round to the same cell on every axis. The rounded
/// value is kept as an `f64`, so the grid has no range limit short of
/// overflowing the quotient itself.
#[inline]
#[must_use]
pub fn cell_key(p: &Point3<f64>, eps: f64) -> CellKey {
    (quantize(p.x, eps), quantize(p.y, eps), quantize(p.z, eps))
}

#[inline]
fn quantize(x: f64, eps: f64) -> u64 {
    // Adding 0.0 folds -0.0 into +0.0.
    ((x / eps).round() + 0.0).to_bits()
}

/// Weld the corners of `soup` with grid quantum `eps`.
///
/// Ids are dense and assigned in first-seen corner order, so the result is a
/// deterministic function of the soup and `eps`. Nearby corners that straddle
/// a cell boundary stay separate.
///
/// # Errors
///
/// Returns [`SubdivideError::InvalidTolerance`] if `eps` is not a finite
/// positive number, [`SubdivideError::Layout`] if the soup is malformed, or
/// [`SubdivideError::CellOverflow`] if a coordinate divided by `eps` is not
/// representable.
///
/// # Example
///
/// ```
/// use mesh_types::TriangleSoup;
/// use mesh_subdivide::weld;
///
/// // Two triangles sharing the edge (1,0,0)-(0,1,0), with a little noise.
/// let soup = TriangleSoup::from_flat(
///     &[
///         0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
///         1.00001, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.99999, 0.0,
///     ],
///     None,
/// )?;
///
/// let welded = weld(&soup, 1e-4)?;
/// assert_eq!(welded.vertex_count(), 4);
/// assert_eq!(welded.triangles, vec![[0, 1, 2], [1, 3, 2]]);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn weld(soup: &TriangleSoup, eps: f64) -> SubdivideResult<WeldedMesh> {
    if !eps.is_finite() || eps <= 0.0 {
        return Err(SubdivideError::InvalidTolerance(eps));
    }
    soup.validate()?;

    let corners = soup.corner_count();
    let mut cells: HashMap<CellKey, u32> = HashMap::with_capacity(corners / 2);
    let mut positions = Vec::new();
    let mut uvs = soup.uvs.as_ref().map(|_| Vec::new());
    let mut corner_map = Vec::with_capacity(corners);

    for (corner, p) in soup.positions.iter().enumerate() {
        if p.coords.iter().any(|c| !(c / eps).is_finite()) {
            return Err(SubdivideError::CellOverflow {
                corner,
                tolerance: eps,
            });
        }
        let id = match cells.entry(cell_key(p, eps)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = positions.len() as u32;
                positions.push(*p);
                if let (Some(dst), Some(src)) = (uvs.as_mut(), soup.uvs.as_ref()) {
                    dst.push(src[corner]);
                }
                *e.insert(id)
            }
        };
        corner_map.push(id);
    }

    let triangles = corner_map
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    Ok(WeldedMesh {
        positions,
        uvs,
        triangles,
        corner_map,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::SoupLayoutError;

    fn quad_soup() -> TriangleSoup {
        TriangleSoup::from_flat(
            &[
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
            ],
            Some(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.5, 0.5, 1.0, 1.0, 0.0, 1.0]),
        )
        .unwrap()
    }

    #[test]
    fn test_cell_key_rounds() {
        let eps = 0.1;
        assert_eq!(
            cell_key(&Point3::new(0.14, -0.16, 0.0), eps),
            (1.0_f64.to_bits(), (-2.0_f64).to_bits(), 0.0_f64.to_bits())
        );
        // Both zero signs share a cell.
        assert_eq!(
            cell_key(&Point3::new(-0.01, 0.0, -0.0), eps),
            cell_key(&Point3::new(0.01, 0.0, 0.0), eps)
        );
        assert_eq!(
            cell_key(&Point3::new(0.0, 0.0, 0.0), eps),
            cell_key(&Point3::new(0.04, -0.04, 0.049), eps)
        );
    }

    #[test]
    fn test_weld_shared_diagonal() {
        let welded = weld(&quad_soup(), 1e-4).unwrap();
        assert_eq!(welded.vertex_count(), 4);
        assert_eq!(welded.merged_corners(), 2);
        assert_eq!(welded.corner_map, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(welded.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_first_seen_uv_wins() {
        let welded = weld(&quad_soup(), 1e-4).unwrap();
        let uvs = welded.uvs.unwrap();
        assert_eq!(uvs.len(), 4);
        // Corner 3 carried (0.5, 0.5) but corner 0 came first.
        assert_eq!(uvs[0], Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_distinct_corners_stay_apart() {
        let soup =
            TriangleSoup::from_flat(&[0.0, 0.0, 0.0, 1e-3, 0.0, 0.0, 0.0, 1e-3, 0.0], None)
                .unwrap();
        let welded = weld(&soup, 1e-4).unwrap();
        assert_eq!(welded.vertex_count(), 3);

        // A coarse grid merges everything into one cell.
        let welded = weld(&soup, 1.0).unwrap();
        assert_eq!(welded.vertex_count(), 1);
        assert_eq!(welded.triangles, vec![[0, 0, 0]]);
    }

    #[test]
    fn test_far_corners_stay_apart() {
        // Quotients above i64::MAX must not saturate into one cell.
        let soup = TriangleSoup::from_flat(
            &[1e15, 0.0, 0.0, 2e15, 0.0, 0.0, 1e15, 1e15, 0.0],
            None,
        )
        .unwrap();
        let welded = weld(&soup, 1e-4).unwrap();
        assert_eq!(welded.vertex_count(), 3);
        assert_eq!(welded.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_weld_rejects_overflowing_quotient() {
        let soup = TriangleSoup::from_flat(
            &[0.0, 0.0, 0.0, 1e300, 0.0, 0.0, 0.0, 1.0, 0.0],
            None,
        )
        .unwrap();
        assert_eq!(
            weld(&soup, 1e-100),
            Err(SubdivideError::CellOverflow {
                corner: 1,
                tolerance: 1e-100
            })
        );
    }

    #[test]
    fn test_weld_is_deterministic() {
        let soup = quad_soup();
        assert_eq!(weld(&soup, 1e-4).unwrap(), weld(&soup, 1e-4).unwrap());
    }

    #[test]
    fn test_weld_rejects_bad_eps() {
        let soup = quad_soup();
        assert!(matches!(
            weld(&soup, 0.0),
            Err(SubdivideError::InvalidTolerance(_))
        ));
        assert!(matches!(
            weld(&soup, f64::NAN),
            Err(SubdivideError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_weld_rejects_partial_triangle() {
        let mut soup = quad_soup();
        soup.positions.pop();
        soup.uvs = None;
        assert_eq!(
            weld(&soup, 1e-4),
            Err(SubdivideError::Layout(SoupLayoutError::PartialTriangle {
                corners: 5
            }))
        );
    }
}
