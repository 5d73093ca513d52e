//! Subdivision parameters.

use crate::error::{SubdivideError, SubdivideResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default welding quantum for corner positions.
pub const DEFAULT_POSITION_TOLERANCE: f64 = 1e-4;

/// Subdivision algorithm to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SubdivisionMethod {
    /// Loop subdivision - smoothing subdivision for triangle meshes.
    /// Repositions original vertices and weights edge points by their
    /// neighborhood.
    #[default]
    Loop,

    /// Midpoint subdivision - same 1-to-4 split, but original vertices stay
    /// put and every edge point is the plain edge midpoint.
    Midpoint,
}

impl SubdivisionMethod {
    /// Check if this method produces a smoothed result.
    #[must_use]
    pub const fn is_smoothing(&self) -> bool {
        matches!(self, Self::Loop)
    }
}

/// Parameters for mesh subdivision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubdivideParams {
    /// Subdivision method to use.
    pub method: SubdivisionMethod,

    /// Number of subdivision passes. Zero returns a copy of the input.
    pub iterations: u32,

    /// Blend each original vertex's UV with its neighbors' UVs.
    pub uv_smooth: bool,

    /// Quantum used to weld near-identical corners.
    pub position_tolerance: f64,

    /// Maximum triangles allowed in result (prevents memory issues).
    pub max_triangles: usize,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            method: SubdivisionMethod::default(),
            iterations: 1,
            uv_smooth: false,
            position_tolerance: DEFAULT_POSITION_TOLERANCE,
            max_triangles: 10_000_000,
        }
    }
}

impl SubdivideParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters for Loop subdivision.
    #[must_use]
    pub fn loop_subdivision() -> Self {
        Self {
            method: SubdivisionMethod::Loop,
            ..Self::default()
        }
    }

    /// Create parameters for midpoint subdivision.
    #[must_use]
    pub fn midpoint() -> Self {
        Self {
            method: SubdivisionMethod::Midpoint,
            ..Self::default()
        }
    }

    /// Set subdivision method.
    #[must_use]
    pub const fn with_method(mut self, method: SubdivisionMethod) -> Self {
        self.method = method;
        self
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set whether original vertex UVs are smoothed.
    #[must_use]
    pub const fn with_uv_smooth(mut self, smooth: bool) -> Self {
        self.uv_smooth = smooth;
        self
    }

    /// Set the welding tolerance.
    #[must_use]
    pub const fn with_position_tolerance(mut self, tolerance: f64) -> Self {
        self.position_tolerance = tolerance;
        self
    }

    /// Set maximum triangles allowed.
    #[must_use]
    pub const fn with_max_triangles(mut self, max_triangles: usize) -> Self {
        self.max_triangles = max_triangles;
        self
    }

    /// Check the parameters on their own, independent of any mesh.
    ///
    /// # Errors
    ///
    /// Returns [`SubdivideError::InvalidTolerance`] if the welding tolerance
    /// is not a finite positive number.
    pub fn validate(&self) -> SubdivideResult<()> {
        if !self.position_tolerance.is_finite() || self.position_tolerance <= 0.0 {
            return Err(SubdivideError::InvalidTolerance(self.position_tolerance));
        }
        Ok(())
    }

    /// Calculate expected triangle count after subdivision.
    ///
    /// Each iteration multiplies the count by 4. Saturates at `usize::MAX`.
    #[must_use]
    pub const fn expected_triangles(&self, current: usize) -> usize {
        let mut triangles = current;
        let mut i = 0;
        while i < self.iterations && triangles != 0 && triangles != usize::MAX {
            triangles = triangles.saturating_mul(4);
            i += 1;
        }
        triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SubdivideParams::default();
        assert_eq!(params.method, SubdivisionMethod::Loop);
        assert_eq!(params.iterations, 1);
        assert!(!params.uv_smooth);
        assert!((params.position_tolerance - 1e-4).abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let params = SubdivideParams::new()
            .with_method(SubdivisionMethod::Midpoint)
            .with_iterations(3)
            .with_uv_smooth(true)
            .with_position_tolerance(1e-6)
            .with_max_triangles(1_000_000);

        assert_eq!(params.method, SubdivisionMethod::Midpoint);
        assert_eq!(params.iterations, 3);
        assert!(params.uv_smooth);
        assert_eq!(params.max_triangles, 1_000_000);
    }

    #[test]
    fn test_validate_rejects_bad_tolerance() {
        for bad in [0.0, -1e-4, f64::NAN, f64::INFINITY] {
            let params = SubdivideParams::new().with_position_tolerance(bad);
            assert!(
                matches!(params.validate(), Err(SubdivideError::InvalidTolerance(_))),
                "tolerance {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_expected_triangles() {
        let params = SubdivideParams::new().with_iterations(0);
        assert_eq!(params.expected_triangles(100), 100);

        let params = SubdivideParams::new().with_iterations(2);
        assert_eq!(params.expected_triangles(100), 1600);

        let params = SubdivideParams::new().with_iterations(3);
        assert_eq!(params.expected_triangles(12), 768); // 12 * 4^3

        let params = SubdivideParams::new().with_iterations(64);
        assert_eq!(params.expected_triangles(2), usize::MAX);

        // Stops early once the count is pinned at zero or saturated.
        let params = SubdivideParams::new().with_iterations(u32::MAX);
        assert_eq!(params.expected_triangles(0), 0);
        assert_eq!(params.expected_triangles(1), usize::MAX);
    }

    #[test]
    fn test_is_smoothing() {
        assert!(SubdivisionMethod::Loop.is_smoothing());
        assert!(!SubdivisionMethod::Midpoint.is_smoothing());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_config_uses_defaults() {
        let params: SubdivideParams =
            serde_json::from_str(r#"{ "iterations": 2, "method": "midpoint" }"#).unwrap();
        assert_eq!(params.iterations, 2);
        assert_eq!(params.method, SubdivisionMethod::Midpoint);
        assert!(!params.uv_smooth);

        let negative = serde_json::from_str::<SubdivideParams>(r#"{ "iterations": -1 }"#);
        assert!(negative.is_err());
    }
}
