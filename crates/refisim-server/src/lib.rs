//! # Refisim Server
//!
//! REST server for the Refisim refinancing simulator.
//!
//! ## Features
//!
//! - Single and batch simulation endpoints
//! - Lookup by simulation id and by customer
//! - Status updates for downstream workflow
//! - Health endpoint
//! - Configuration via TOML file
//!
//! ## Usage
//!
//! ```ignore
//! use refisim_server::{Server, ServerConfig};
//!
//! let server = Server::from_config(ServerConfig::default())?;
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use refisim_engine::{EngineResult, SimulationEngine, SimulationEngineBuilder};
use refisim_ext_memory::InMemorySimulationStore;
use refisim_traits::SimulationStore;

pub use config::ServerConfig;
pub use error::ApiError;

/// The Refisim server.
pub struct Server {
    config: ServerConfig,
    engine: Arc<SimulationEngine>,
    store: Arc<dyn SimulationStore>,
}

impl Server {
    /// Create a new server with an in-memory store.
    pub fn new(config: ServerConfig, engine: Arc<SimulationEngine>) -> Self {
        Self {
            config,
            engine,
            store: Arc::new(InMemorySimulationStore::new()),
        }
    }

    /// Create a server, building the engine from `config.engine`.
    pub fn from_config(config: ServerConfig) -> EngineResult<Self> {
        let engine = SimulationEngineBuilder::new()
            .with_config(config.engine.clone())
            .build()?;
        Ok(Self::new(config, Arc::new(engine)))
    }

    /// Replace the simulation store.
    pub fn with_store(mut self, store: Arc<dyn SimulationStore>) -> Self {
        self.store = store;
        self
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router_with_store(
            self.engine.clone(),
            self.store.clone(),
            self.config.max_batch_size,
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::new(
            self.config.host.parse().unwrap_or([0, 0, 0, 0].into()),
            self.config.port,
        );

        info!("Starting Refisim server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}
