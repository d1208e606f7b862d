use super::ElementType;

/// Errors that can occur when reading or writing masked properties
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    /// The property was never set
    #[error("Property not found: {0}")]
    KeyNotFound(String),

    /// Number of supplied values does not match the number of active points
    #[error("Property '{key}' expects {expected} values (one per active point), got {actual}")]
    LengthMismatch {
        /// Property name
        key: String,
        /// Number of active points times components
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// Element type or component count differs from the stored array
    #[error(
        "Property '{key}' is stored as {expected:?} x{expected_components}, \
         got {actual:?} x{actual_components}"
    )]
    TypeMismatch {
        /// Property name
        key: String,
        /// Element type fixed at creation
        expected: ElementType,
        /// Component count fixed at creation
        expected_components: usize,
        /// Element type of the supplied values
        actual: ElementType,
        /// Component count of the supplied values
        actual_components: usize,
    },

    /// Mask length differs from the number of points in the domain
    #[error("Mask has {actual} entries, expected {expected}")]
    MaskLength {
        /// Number of points in the domain
        expected: usize,
        /// Length of the supplied mask
        actual: usize,
    },
}
