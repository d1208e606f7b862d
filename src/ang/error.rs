use crate::crystal_map::MapError;
use crate::properties::PropertyError;

/// Errors that can occur when reading or writing ANG files
#[derive(Debug, thiserror::Error)]
pub enum AngError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Data block could not be read as a numeric table
    #[error("Invalid format at line {line}: {message}")]
    InvalidFormat {
        /// 1-based line number in the file
        line: usize,
        /// What went wrong
        message: String,
    },

    /// The map has more dimensions than the format supports
    #[error("Writing a {ndim}D map to an ANG file is not supported (at most 2 dimensions)")]
    UnsupportedDimensions {
        /// Number of map dimensions
        ndim: usize,
    },

    /// Property store error
    #[error("Property error: {0}")]
    PropertyError(#[from] PropertyError),

    /// Crystal map error
    #[error("Map error: {0}")]
    MapError(#[from] MapError),
}
