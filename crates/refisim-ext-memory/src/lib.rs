//! # Refisim In-Memory Extension
//!
//! DashMap-backed implementation of [`SimulationStore`](refisim_traits::SimulationStore).
//! Nothing survives a restart; suitable for a single service instance and tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod store;

pub use store::InMemorySimulationStore;
