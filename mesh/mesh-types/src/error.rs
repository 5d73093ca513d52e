//! Layout errors for triangle soup buffers.

use thiserror::Error;

/// A triangle soup whose buffers do not describe whole triangles.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoupLayoutError {
    /// Flat position buffer does not hold whole 3D points.
    #[error("position buffer has {len} components, not a multiple of 3 (positions must be 3D)")]
    PositionArity {
        /// Number of scalar components in the buffer.
        len: usize,
    },

    /// Flat UV buffer does not hold whole 2D points.
    #[error("uv buffer has {len} components, not a multiple of 2 (uvs must be 2D)")]
    UvArity {
        /// Number of scalar components in the buffer.
        len: usize,
    },

    /// Corner count cannot be grouped into triangles.
    #[error("soup has {corners} corners, not a multiple of 3")]
    PartialTriangle {
        /// Number of corners in the soup.
        corners: usize,
    },

    /// UV and position buffers are not corner-aligned.
    #[error("soup has {corners} corners but {uvs} uvs")]
    UvCountMismatch {
        /// Number of position corners.
        corners: usize,
        /// Number of texture coordinates.
        uvs: usize,
    },

    /// A corner position is NaN or infinite.
    #[error("corner {corner} has a non-finite position")]
    NonFinitePosition {
        /// Index of the offending corner.
        corner: usize,
    },

    /// A corner texture coordinate is NaN or infinite.
    #[error("corner {corner} has a non-finite uv")]
    NonFiniteUv {
        /// Index of the offending corner.
        corner: usize,
    },

    /// A face refers to a vertex the mesh does not have.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    IndexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The invalid vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },
}
