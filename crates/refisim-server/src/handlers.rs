//! Request handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use refisim_core::validation::Validate;
use refisim_core::{SimulationId, SimulationRequest, SimulationResult, SimulationStatus};
use refisim_engine::SimulationEngine;
use refisim_traits::{Page, Pagination, SimulationStore};

use crate::error::{ApiError, ErrorEnvelope};

/// Application state.
pub struct AppState {
    /// The simulation engine
    pub engine: Arc<SimulationEngine>,
    /// Simulation result store
    pub store: Arc<dyn SimulationStore>,
    /// Largest accepted batch
    pub max_batch_size: usize,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn parse_simulation_id(raw: &str) -> Result<SimulationId, ApiError> {
    raw.parse().map_err(ApiError::from)
}

/// Validate, simulate and store a single request.
pub async fn calculate_simulation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<Json<SimulationResult>, ApiError> {
    let Json(request) = payload?;
    request.validate_or_error()?;

    let result = state.engine.calculate(&request)?;
    state.store.save(&result).await?;

    info!(
        simulation_id = %result.simulation_id,
        processing_time_ms = result.processing_time_ms,
        "Simulation stored"
    );
    Ok(Json(result))
}

/// Batch simulation request.
#[derive(Debug, Deserialize)]
pub struct BatchSimulationRequest {
    /// Requests to simulate
    pub requests: Vec<SimulationRequest>,
}

/// Outcome of one batch entry.
#[derive(Debug, Serialize)]
pub struct BatchItem {
    /// Position in the submitted batch
    pub index: usize,
    /// Result, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SimulationResult>,
    /// Error, on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

impl BatchItem {
    fn failed(index: usize, error: &ApiError) -> Self {
        Self {
            index,
            result: None,
            error: Some(error.envelope()),
        }
    }
}

/// Batch simulation response.
#[derive(Debug, Serialize)]
pub struct BatchSimulationResponse {
    /// One entry per submitted request, in submission order
    pub results: Vec<BatchItem>,
    /// Number of successful simulations
    pub succeeded: usize,
    /// Number of failed simulations
    pub failed: usize,
}

/// Validate and simulate a batch of requests.
///
/// Invalid entries are reported individually and never reach the engine.
pub async fn batch_simulate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchSimulationRequest>, JsonRejection>,
) -> Result<Json<BatchSimulationResponse>, ApiError> {
    let Json(batch) = payload?;
    if batch.requests.is_empty() {
        return Err(ApiError::InvalidArgument("Batch must not be empty".into()));
    }
    if batch.requests.len() > state.max_batch_size {
        return Err(ApiError::InvalidArgument(format!(
            "Batch of {} exceeds the maximum of {}",
            batch.requests.len(),
            state.max_batch_size
        )));
    }

    let mut items: Vec<Option<BatchItem>> = Vec::with_capacity(batch.requests.len());
    let mut accepted = Vec::new();
    let mut accepted_index = Vec::new();
    for (index, request) in batch.requests.into_iter().enumerate() {
        match request.validate_or_error() {
            Ok(()) => {
                items.push(None);
                accepted_index.push(index);
                accepted.push(request);
            }
            Err(e) => items.push(Some(BatchItem::failed(index, &ApiError::from(e)))),
        }
    }

    debug!(accepted = accepted.len(), total = items.len(), "Running batch");

    let engine = state.engine.clone();
    let outcomes = tokio::task::spawn_blocking(move || engine.calculate_batch(&accepted))
        .await
        .map_err(|e| ApiError::Internal(format!("batch worker failed: {}", e)))?;

    for (index, outcome) in accepted_index.into_iter().zip(outcomes) {
        let item = match outcome {
            Ok(result) => match state.store.save(&result).await {
                Ok(()) => BatchItem {
                    index,
                    result: Some(result),
                    error: None,
                },
                Err(e) => BatchItem::failed(index, &ApiError::from(e)),
            },
            Err(e) => BatchItem::failed(index, &ApiError::from(e)),
        };
        items[index] = Some(item);
    }

    let results: Vec<BatchItem> = items.into_iter().flatten().collect();
    let succeeded = results.iter().filter(|item| item.result.is_some()).count();

    Ok(Json(BatchSimulationResponse {
        failed: results.len() - succeeded,
        succeeded,
        results,
    }))
}

/// Get a stored simulation by ID.
pub async fn get_simulation(
    State(state): State<Arc<AppState>>,
    Path(simulation_id): Path<String>,
) -> Result<Json<SimulationResult>, ApiError> {
    let id = parse_simulation_id(&simulation_id)?;
    state
        .store
        .get(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::SimulationNotFound(simulation_id))
}

/// List a customer's simulations, newest first.
pub async fn list_customer_simulations(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
    query: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Page<SimulationResult>>, ApiError> {
    let Query(pagination) = query.map_err(|e| ApiError::InvalidArgument(e.body_text()))?;
    let page = state
        .store
        .list_by_customer(&customer_id, &pagination)
        .await?;
    Ok(Json(page))
}

/// Status update request.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    /// New status code (CALCULATED, PENDING or REJECTED)
    pub status: String,
}

/// Replace the status of a stored simulation.
pub async fn update_simulation_status(
    State(state): State<Arc<AppState>>,
    Path(simulation_id): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<SimulationResult>, ApiError> {
    let Json(update) = payload?;
    let id = parse_simulation_id(&simulation_id)?;
    let status: SimulationStatus = update.status.parse()?;

    let updated = state.store.update_status(&id, status).await?;
    info!(simulation_id = %id, status = %status, "Simulation status updated");
    Ok(Json(updated))
}
