//! Error types for selection list operations.

use thiserror::Error;

/// Errors raised by [`SelectionList`](crate::SelectionList) lookups and
/// structural mutations.
///
/// Mutations aimed at a disabled entry are not errors; they are silent
/// no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionListError {
    /// Two entries share the same identifier.
    #[error("duplicate entry identifier '{0}'")]
    DuplicateIdentifier(String),

    /// An index-based accessor was given a position outside the list.
    #[error("entry index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },

    /// No entry carries the requested identifier.
    #[error("no entry with identifier '{0}'")]
    IdentifierNotFound(String),
}

pub type Result<T> = std::result::Result<T, SelectionListError>;
