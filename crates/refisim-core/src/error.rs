//! Error types for the Refisim core crate.

use thiserror::Error;

use crate::validation::ValidationError;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while parsing or validating core domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Loan type string does not name a supported product.
    #[error("Unknown loan type: {value}")]
    UnknownLoanType {
        /// The rejected input.
        value: String,
    },

    /// Status string does not name a simulation status.
    #[error("Unknown simulation status: {value}")]
    UnknownStatus {
        /// The rejected input.
        value: String,
    },

    /// Simulation identifier is not in the `SIM-XXXXXXXX` format.
    #[error("Invalid simulation id: {value}")]
    InvalidSimulationId {
        /// The rejected input.
        value: String,
    },

    /// One or more request fields failed validation.
    #[error("Request validation failed: {}", format_violations(.0))]
    Validation(Vec<ValidationError>),
}

impl CoreError {
    /// Creates an unknown loan type error.
    #[must_use]
    pub fn unknown_loan_type(value: impl Into<String>) -> Self {
        Self::UnknownLoanType {
            value: value.into(),
        }
    }

    /// Creates an unknown status error.
    #[must_use]
    pub fn unknown_status(value: impl Into<String>) -> Self {
        Self::UnknownStatus {
            value: value.into(),
        }
    }

    /// Creates an invalid simulation id error.
    #[must_use]
    pub fn invalid_simulation_id(value: impl Into<String>) -> Self {
        Self::InvalidSimulationId {
            value: value.into(),
        }
    }
}

fn format_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
