//! Error types for value conversion and slot access

/// Result type for value-level operations
pub type ValueResult<T> = Result<T, ValueError>;

/// Value conversion and slot access errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// Type mismatch during conversion
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Wrong number of arguments handed to an invoker
    #[error("Argument count mismatch: expected {expected}, got {got}")]
    ArgumentCount {
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// A slot index that the object does not expose
    #[error("No {kind} slot at index {index}")]
    NoSuchSlot {
        /// Slot family ("property", "method", "field")
        kind: &'static str,
        /// Requested index
        index: usize,
    },
}

impl ValueError {
    /// Shorthand for a conversion failure
    pub fn mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        ValueError::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}
