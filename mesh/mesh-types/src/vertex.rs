//! Vertex type.

use nalgebra::{Point2, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vertex in 3D space with an optional texture coordinate.
///
/// # Example
///
/// ```
/// use mesh_types::{Point2, Point3, Vertex};
///
/// let v1 = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// let v2 = Vertex::from_coords(1.0, 2.0, 3.0).with_uv(Point2::new(0.5, 0.5));
///
/// assert_eq!(v1.position, v2.position);
/// assert!(v1.uv.is_none());
/// assert!(v2.uv.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Texture coordinate (U, V).
    pub uv: Option<Point2<f64>>,
}

impl Vertex {
    /// Create a vertex with only a position.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self { position, uv: None }
    }

    /// Create a vertex from raw coordinates.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Attach a texture coordinate.
    #[inline]
    #[must_use]
    pub const fn with_uv(mut self, uv: Point2<f64>) -> Self {
        self.uv = Some(uv);
        self
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_from_coords() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert!((v.position.x - 1.0).abs() < f64::EPSILON);
        assert!((v.position.y - 2.0).abs() < f64::EPSILON);
        assert!((v.position.z - 3.0).abs() < f64::EPSILON);
        assert!(v.uv.is_none());
    }

    #[test]
    fn vertex_with_uv() {
        let v = Vertex::from_coords(0.0, 0.0, 0.0).with_uv(Point2::new(0.25, 0.75));
        assert_eq!(v.uv, Some(Point2::new(0.25, 0.75)));
    }

    #[test]
    fn vertex_from_array() {
        let v: Vertex = [1.0, 2.0, 3.0].into();
        assert!((v.position.z - 3.0).abs() < f64::EPSILON);
    }
}
