//! # Refisim Traits
//!
//! Trait definitions for the Refisim simulation service.
//!
//! This crate contains ONLY trait definitions. Implementations live in
//! extension crates such as `refisim-ext-memory`.
//!
//! ## Module Structure
//!
//! - [`storage`]: Persistence of simulation results
//! - [`error`]: Shared error type for trait operations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod storage;

// Re-export commonly used types
pub use error::TraitError;
pub use storage::{Page, Pagination, SimulationStore};
