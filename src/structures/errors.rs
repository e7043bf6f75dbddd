//! Error kinds reported by the structure engines
//!
//! Every variant describes an expected, recoverable condition. The engine
//! leaves its contents untouched when it returns one of these, and the
//! coordinator turns the `Display` text into a one-line status message.

use thiserror::Error;

/// Recoverable failures of a single engine operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructureError {
    /// Index outside the range allowed by the operation
    #[error("Invalid index.")]
    InvalidIndex { index: i64, len: usize },

    /// Operation needs at least one element
    #[error("{kind} is empty.")]
    EmptyStructure { kind: &'static str },

    /// Search or delete target is absent
    #[error("Value not found.")]
    ValueNotFound { value: f64 },

    /// BST insert of a value that is already present
    #[error("Duplicate values are not allowed.")]
    DuplicateValue { value: f64 },
}

impl StructureError {
    /// Shorthand for an out-of-range `usize` index
    pub(crate) fn invalid_index(index: usize, len: usize) -> Self {
        StructureError::InvalidIndex {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len,
        }
    }
}
