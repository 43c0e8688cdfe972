//! API error type and the JSON error envelope.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use refisim_core::validation::ValidationError;
use refisim_core::CoreError;
use refisim_engine::EngineError;
use refisim_traits::TraitError;

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request fields failed validation.
    #[error("Request validation failed")]
    Validation(Vec<ValidationError>),

    /// Malformed body, path or parameter.
    #[error("{0}")]
    InvalidArgument(String),

    /// No simulation with the given id.
    #[error("Simulation not found: {0}")]
    SimulationNotFound(String),

    /// The engine rejected its input as out of contract.
    #[error("{0}")]
    ContractViolation(String),

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

/// Error body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Unique id for correlating with server logs.
    pub error_id: Uuid,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Additional detail, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Per-field validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<ValidationError>>,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::SimulationNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ContractViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ApiError::SimulationNotFound(_) => "SIMULATION_NOT_FOUND",
            ApiError::ContractViolation(_) => "CONTRACT_VIOLATION",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Builds the envelope for this error.
    pub fn envelope(&self) -> ErrorEnvelope {
        let (message, details, field_errors) = match self {
            ApiError::Validation(errors) => (
                "Request validation failed".to_string(),
                Some(format!("{} field(s) rejected", errors.len())),
                Some(errors.clone()),
            ),
            ApiError::Internal(_) => (
                "An unexpected error occurred".to_string(),
                None,
                None,
            ),
            other => (other.to_string(), None, None),
        };

        ErrorEnvelope {
            error_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            status: self.status_code().as_u16(),
            error: self.code(),
            message,
            details,
            field_errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = self.envelope();
        match &self {
            ApiError::Internal(reason) => {
                error!(error_id = %envelope.error_id, %reason, "Internal error");
            }
            other => {
                warn!(error_id = %envelope.error_id, code = envelope.error, "{}", other);
            }
        }
        (self.status_code(), Json(envelope)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(errors) => ApiError::Validation(errors),
            other => ApiError::InvalidArgument(other.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::ContractViolation { .. } => ApiError::ContractViolation(e.to_string()),
            EngineError::InvalidConfig(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<TraitError> for ApiError {
    fn from(e: TraitError) -> Self {
        match e {
            TraitError::NotFound(id) => ApiError::SimulationNotFound(id),
            TraitError::InvalidInput(reason) => ApiError::InvalidArgument(reason),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidArgument(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_codes() {
        let cases = [
            (ApiError::Validation(vec![]), 400, "VALIDATION_FAILED"),
            (ApiError::InvalidArgument("x".into()), 400, "INVALID_ARGUMENT"),
            (ApiError::SimulationNotFound("SIM-1".into()), 404, "SIMULATION_NOT_FOUND"),
            (ApiError::ContractViolation("x".into()), 422, "CONTRACT_VIOLATION"),
            (ApiError::Internal("x".into()), 500, "INTERNAL_SERVER_ERROR"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_code().as_u16(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_validation_envelope_carries_fields() {
        let err = ApiError::Validation(vec![ValidationError::new("credit_score", "too low")]);
        let envelope = err.envelope();
        assert_eq!(envelope.status, 400);
        let fields = envelope.field_errors.unwrap();
        assert_eq!(fields[0].field, "credit_score");
    }

    #[test]
    fn test_internal_message_is_generic() {
        let envelope = ApiError::Internal("db exploded".into()).envelope();
        assert_eq!(envelope.message, "An unexpected error occurred");
        assert!(envelope.details.is_none());
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::unknown_status("ARCHIVED").into();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn test_not_found_mapping() {
        let err: ApiError = TraitError::NotFound("SIM-ABCDEF12".into()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
