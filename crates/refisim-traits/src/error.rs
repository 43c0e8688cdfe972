//! Error types for trait operations.

use thiserror::Error;

/// Common error type for trait operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraitError {
    /// Requested resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Resource already exists
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Storage backend failure
    #[error("storage error: {0}")]
    StorageError(String),
}

impl TraitError {
    /// Returns true for [`TraitError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, TraitError::NotFound(_))
    }
}
