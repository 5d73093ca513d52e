//! Error types for mesh subdivision operations.

use mesh_types::SoupLayoutError;
use thiserror::Error;

/// Errors that can occur during subdivision operations.
///
/// Every variant is raised before a pass produces output; a pass that gets
/// past welding always completes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubdivideError {
    /// Input buffers do not describe whole, finite triangles.
    #[error(transparent)]
    Layout(#[from] SoupLayoutError),

    /// Welding tolerance is zero, negative, or not finite.
    #[error("Invalid position tolerance: {0} (must be finite and > 0)")]
    InvalidTolerance(f64),

    /// A coordinate divided by the welding tolerance overflows.
    #[error("Corner {corner} cannot be quantized with tolerance {tolerance}")]
    CellOverflow {
        /// Index of the offending corner.
        corner: usize,
        /// Welding tolerance in use.
        tolerance: f64,
    },

    /// Mesh would exceed maximum size.
    #[error(
        "Subdivision would exceed maximum mesh size ({current} -> {projected} triangles, max {max})"
    )]
    MeshTooLarge {
        /// Current triangle count.
        current: usize,
        /// Projected triangle count after subdivision.
        projected: usize,
        /// Maximum allowed triangle count.
        max: usize,
    },
}

impl SubdivideError {
    /// Check if the error comes from the mesh rather than the parameters.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Layout(_))
    }
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
