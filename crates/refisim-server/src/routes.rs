//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;

use refisim_engine::SimulationEngine;
use refisim_ext_memory::InMemorySimulationStore;
use refisim_traits::SimulationStore;

use crate::handlers::{self, AppState};

/// Default batch limit for routers built without a [`ServerConfig`](crate::ServerConfig).
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Create the API router backed by a fresh in-memory store.
///
/// # Arguments
/// * `engine` - The simulation engine
pub fn create_router(engine: Arc<SimulationEngine>) -> Router {
    create_router_with_store(
        engine,
        Arc::new(InMemorySimulationStore::new()),
        DEFAULT_MAX_BATCH_SIZE,
    )
}

/// Create the API router with a specific store.
///
/// # Arguments
/// * `engine` - The simulation engine
/// * `store` - Where results are saved and looked up
/// * `max_batch_size` - Largest accepted batch
pub fn create_router_with_store(
    engine: Arc<SimulationEngine>,
    store: Arc<dyn SimulationStore>,
    max_batch_size: usize,
) -> Router {
    let state = Arc::new(AppState {
        engine,
        store,
        max_batch_size,
    });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Simulations
        .route("/api/v1/simulations/calculate", post(handlers::calculate_simulation))
        .route("/api/v1/simulations/batch", post(handlers::batch_simulate))
        .route("/api/v1/simulations/:simulation_id", get(handlers::get_simulation))
        .route(
            "/api/v1/simulations/:simulation_id/status",
            patch(handlers::update_simulation_status),
        )
        // Customers
        .route(
            "/api/v1/customers/:customer_id/simulations",
            get(handlers::list_customer_simulations),
        )
        // State
        .with_state(state)
}
