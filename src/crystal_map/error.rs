use crate::properties::PropertyError;

/// Errors that can occur when building or querying a crystal map
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// A per-point array does not cover every point
    #[error("Array '{name}' has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Array name
        name: String,
        /// Number of points in the map
        expected: usize,
        /// Length of the supplied array
        actual: usize,
    },

    /// Grid shape does not match the number of points
    #[error("Shape {shape:?} holds {expected} points, but the map has {actual}")]
    ShapeMismatch {
        /// Requested shape
        shape: Vec<usize>,
        /// Product of the shape dimensions
        expected: usize,
        /// Number of points in the map
        actual: usize,
    },

    /// Two phases share an id
    #[error("Duplicate phase id: {0}")]
    DuplicatePhaseId(i32),

    /// Property store error
    #[error("Property error: {0}")]
    Property(#[from] PropertyError),
}
