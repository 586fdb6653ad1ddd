//! MeshSurferError: Unified error type for mesh-surfer public APIs
//!
//! Precondition violations (bad dimensionality, malformed bounding boxes,
//! out-of-range indices) surface here immediately. Recoverable conditions such
//! as degenerate faces or an unchainable boundary are not errors.

use thiserror::Error;

/// Unified error type for mesh-surfer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshSurferError {
    /// Vertices can only be 2- or 3-dimensional.
    #[error("invalid dimensionality of vertices: can only be 2 or 3, but got {0}")]
    InvalidDimensionality(u8),
    /// `set_bounding_box` received the wrong number of values.
    #[error("invalid periodic box: got {count} values for {dim}D")]
    InvalidBoundingBox { count: usize, dim: u8 },
    /// `wrap_vertices` was asked to wrap more axes than the mesh has.
    #[error("invalid wrap dimension {requested} for {dim}D vertices")]
    InvalidWrapDimension { requested: u8, dim: u8 },
    /// A periodic operation ran before the bounding box was set.
    #[error("periodic bounding box not available")]
    BoundingBoxUnavailable,
    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {vertex}, but the mesh has {num_vertices} vertices")]
    VertexOutOfRange {
        face: usize,
        vertex: usize,
        num_vertices: usize,
    },
    /// A scalar field does not match the vertex count.
    #[error("field `{name}` has {found} values, expected {expected}")]
    FieldLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// A flat buffer length is not a multiple of its stride.
    #[error("{what} buffer of length {len} is not a multiple of {stride}")]
    InvalidBufferLength {
        what: &'static str,
        len: usize,
        stride: usize,
    },
    /// The operation is only defined for one dimensionality.
    #[error("{operation} requires a {required}D mesh, got {found}D")]
    UnsupportedDimension {
        operation: &'static str,
        required: u8,
        found: u8,
    },
    /// A periodic triangulation reported an offset outside the 9-sheeted covering.
    #[error("face {face} has periodic offset {offset} outside {{0, 1, 2}}")]
    InvalidPeriodicOffset { face: usize, offset: u8 },
    /// Border parameterization needs a longer boundary.
    #[error("border too short for parameterization: {0} edges")]
    BorderTooShort(usize),
    /// An external triangulation/projection/parameterization service failed.
    #[error("external service failure: {0}")]
    ServiceFailure(String),
    /// Malformed mesh file contents.
    #[error("mesh I/O parse error: {0}")]
    MeshIoParse(String),
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MeshSurferError {
    fn from(err: std::io::Error) -> Self {
        MeshSurferError::Io(err.to_string())
    }
}
