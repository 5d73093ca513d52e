//! A soup triangle resolved to concrete corner positions.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Three corner positions read from a soup or an indexed mesh.
///
/// Corners keep the order of the source, so the winding of the source face
/// decides the sign of [`Triangle::normal_unnormalized`].
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Triangle};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// );
///
/// assert_eq!(tri.area(), 2.0);
/// assert!((tri.longest_edge() - 8.0_f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// Corner positions in source order.
    pub corners: [Point3<f64>; 3],
}

impl Triangle {
    /// Triangle with corners `a`, `b`, `c`.
    #[inline]
    #[must_use]
    pub const fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self {
            corners: [a, b, c],
        }
    }

    /// Edge vectors `b - a`, `c - b`, `a - c`.
    #[must_use]
    pub fn edge_vectors(&self) -> [Vector3<f64>; 3] {
        let [a, b, c] = self.corners;
        [b - a, c - b, a - c]
    }

    /// `(b - a) x (c - a)`: twice the area, pointing out of the front face.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let [a, b, c] = self.corners;
        (b - a).cross(&(c - a))
    }

    /// Area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Length of the longest edge.
    #[must_use]
    pub fn longest_edge(&self) -> f64 {
        self.edge_vectors()
            .iter()
            .map(|e| e.norm())
            .fold(0.0, f64::max)
    }

    /// Check if the area is at most `tolerance`.
    ///
    /// Slivers and triangles with repeated corners both qualify.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.area() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_of_right_triangle() {
        let tri = Triangle::new(
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(4.0, 1.0, 1.0),
            Point3::new(1.0, 5.0, 1.0),
        );
        assert!((tri.area() - 6.0).abs() < 1e-12);
        assert!((tri.longest_edge() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn edges_close_the_loop() {
        let tri = Triangle::new(
            Point3::new(0.3, -1.0, 2.0),
            Point3::new(1.0, 0.5, 0.0),
            Point3::new(-2.0, 0.0, 1.0),
        );
        let [ab, bc, ca] = tri.edge_vectors();
        assert!((ab + bc + ca).norm() < 1e-12);
    }

    #[test]
    fn reversed_winding_flips_normal() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        assert!(Triangle::new(a, b, c).normal_unnormalized().z > 0.0);
        assert!(Triangle::new(a, c, b).normal_unnormalized().z < 0.0);
    }

    #[test]
    fn repeated_corner_is_degenerate() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let q = Point3::new(2.0, 2.0, 3.0);
        assert!(Triangle::new(p, p, q).is_degenerate(1e-12));
        assert!(Triangle::new(p, q, Point3::new(3.0, 2.0, 3.0)).is_degenerate(1e-12));
        assert!(!Triangle::new(p, q, Point3::new(1.0, 3.0, 3.0)).is_degenerate(1e-12));
    }
}
