//! In-memory simulation store.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use refisim_core::{SimulationId, SimulationResult, SimulationStatus};
use refisim_traits::{Page, Pagination, SimulationStore, TraitError};

/// In-memory simulation store with a per-customer index.
#[derive(Debug)]
pub struct InMemorySimulationStore {
    simulations: DashMap<SimulationId, SimulationResult>,
    by_customer: DashMap<String, Vec<SimulationId>>,
}

impl InMemorySimulationStore {
    /// Create a new empty in-memory simulation store.
    pub fn new() -> Self {
        Self {
            simulations: DashMap::new(),
            by_customer: DashMap::new(),
        }
    }

    /// Number of stored simulations.
    pub fn len(&self) -> usize {
        self.simulations.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.simulations.is_empty()
    }
}

impl Default for InMemorySimulationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SimulationStore for InMemorySimulationStore {
    async fn save(&self, result: &SimulationResult) -> Result<(), TraitError> {
        let id = result.simulation_id.clone();
        match self.simulations.entry(id.clone()) {
            Entry::Occupied(_) => {
                return Err(TraitError::AlreadyExists(id.to_string()));
            }
            Entry::Vacant(slot) => {
                slot.insert(result.clone());
            }
        }

        self.by_customer
            .entry(result.customer_id.clone())
            .or_default()
            .push(id);

        debug!(
            simulation_id = %result.simulation_id,
            customer_id = %result.customer_id,
            "Stored simulation"
        );
        Ok(())
    }

    async fn get(&self, id: &SimulationId) -> Result<Option<SimulationResult>, TraitError> {
        Ok(self.simulations.get(id).map(|r| r.clone()))
    }

    async fn update_status(
        &self,
        id: &SimulationId,
        status: SimulationStatus,
    ) -> Result<SimulationResult, TraitError> {
        let mut entry = self
            .simulations
            .get_mut(id)
            .ok_or_else(|| TraitError::NotFound(id.to_string()))?;

        debug!(simulation_id = %id, from = %entry.status, to = %status, "Updating simulation status");
        entry.status = status;
        Ok(entry.clone())
    }

    async fn list_by_customer(
        &self,
        customer_id: &str,
        pagination: &Pagination,
    ) -> Result<Page<SimulationResult>, TraitError> {
        let ids = self
            .by_customer
            .get(customer_id)
            .map(|ids| ids.clone())
            .unwrap_or_default();

        let mut results: Vec<SimulationResult> = ids
            .iter()
            .filter_map(|id| self.simulations.get(id).map(|r| r.clone()))
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = results.len() as u64;
        let items = results
            .into_iter()
            .skip(pagination.offset)
            .take(pagination.limit)
            .collect();

        Ok(Page {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
