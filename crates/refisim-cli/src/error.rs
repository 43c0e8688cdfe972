//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Request failed validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Simulation error.
    #[error("Simulation error: {0}")]
    Simulation(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file error.
    #[error("Input error: {0}")]
    Input(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

impl From<refisim_engine::EngineError> for CliError {
    fn from(e: refisim_engine::EngineError) -> Self {
        match e {
            refisim_engine::EngineError::InvalidConfig(_) => CliError::Config(e.to_string()),
            other => CliError::Simulation(other.to_string()),
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        CliError::Input(e.to_string())
    }
}
