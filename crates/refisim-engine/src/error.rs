//! Engine error types.

use refisim_core::validation::ValidationError;
use thiserror::Error;

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
///
/// A valid request never produces an error. Both variants report a defect
/// on the caller's side rather than a business outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine was handed an out-of-contract value.
    #[error("contract violation: {reason}")]
    ContractViolation {
        /// What was violated.
        reason: String,
    },

    /// Engine configuration failed validation.
    #[error("configuration error: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    InvalidConfig(Vec<ValidationError>),
}

impl EngineError {
    /// Creates a contract violation error.
    #[must_use]
    pub fn contract_violation(reason: impl Into<String>) -> Self {
        Self::ContractViolation {
            reason: reason.into(),
        }
    }
}
