//! Storage traits for persistence.
//!
//! - [`SimulationStore`]: Simulation result storage
//!
//! Storage implementations are EXTENSIONS (e.g., in-memory, PostgreSQL).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use refisim_core::{SimulationId, SimulationResult, SimulationStatus};

use crate::error::TraitError;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for list operations.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of items to skip
    #[serde(default)]
    pub offset: usize,
    /// Maximum items to return
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Pagination {
    /// Create new pagination.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}

/// Paginated result.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Items in this page
    pub items: Vec<T>,
    /// Total number of items (across all pages)
    pub total: u64,
    /// Current offset
    pub offset: usize,
    /// Page size limit
    pub limit: usize,
}

impl<T> Page<T> {
    /// Check if there are more pages.
    pub fn has_more(&self) -> bool {
        ((self.offset + self.items.len()) as u64) < self.total
    }
}

// =============================================================================
// SIMULATION STORE
// =============================================================================

/// Storage for simulation results.
#[async_trait]
pub trait SimulationStore: Send + Sync {
    /// Save a result. Fails with [`TraitError::AlreadyExists`] on a duplicate id.
    async fn save(&self, result: &SimulationResult) -> Result<(), TraitError>;

    /// Get a result by ID.
    async fn get(&self, id: &SimulationId) -> Result<Option<SimulationResult>, TraitError>;

    /// Replace the status of a stored result, returning the updated record.
    ///
    /// Fails with [`TraitError::NotFound`] when the id is unknown.
    async fn update_status(
        &self,
        id: &SimulationId,
        status: SimulationStatus,
    ) -> Result<SimulationResult, TraitError>;

    /// List a customer's results, newest first.
    async fn list_by_customer(
        &self,
        customer_id: &str,
        pagination: &Pagination,
    ) -> Result<Page<SimulationResult>, TraitError>;
}
