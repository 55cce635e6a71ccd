//! Error types for polyhedral gravity.

use thiserror::Error;

/// Result type alias for gravity operations.
pub type GravityResult<T> = Result<T, GravityError>;

/// Errors that can occur while building a topology or evaluating a field.
///
/// Numerically delicate field points (on an edge line, on a face plane)
/// are never errors; they are resolved by the tolerances in
/// [`GravityParams`](crate::GravityParams).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GravityError {
    /// Mesh has no vertices or no faces.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    VertexOutOfBounds {
        /// Face index.
        face: usize,
        /// Offending vertex index.
        vertex: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The mesh passed to evaluation is not the one the topology was built from.
    #[error("topology was built for {expected} vertices, but the mesh has {actual}")]
    MeshMismatch {
        /// Vertex count recorded in the topology.
        expected: usize,
        /// Vertex count of the mesh being evaluated.
        actual: usize,
    },

    /// Invalid tolerance parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl GravityError {
    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }
}
