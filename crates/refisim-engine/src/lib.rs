//! # Refisim Engine
//!
//! The refinancing simulation pipeline.
//!
//! This crate provides:
//! - [`pricing`]: Annual rate from credit score, loan type and loan size
//! - [`amortization`]: Annuity payment, totals and a three-period preview
//! - [`risk`]: Debt-to-income and categorical risk with ordered findings
//! - [`approval`]: Approval probability and the resulting status
//! - [`comparison`]: Deltas against the current loan, break-even, remaining term
//! - [`recommendation`]: Next steps and offer conditions
//! - [`SimulationEngine`]: Runs the stages in order and assembles the result
//!
//! ## Architecture
//!
//! ```text
//! Request ─> pricing ─> amortization ─> risk ─> approval ─┬─> comparison
//!                                                          │
//!                                                          └─> recommendation ─> Result
//! ```
//!
//! Every stage is a pure function of the request and [`EngineConfig`].
//!
//! ## Usage
//!
//! ```rust
//! use refisim_core::{LoanType, SimulationRequest};
//! use refisim_engine::{BreakEvenMethod, SimulationEngineBuilder};
//! use rust_decimal_macros::dec;
//!
//! let engine = SimulationEngineBuilder::new()
//!     .with_break_even(BreakEvenMethod::FeePayback)
//!     .build()
//!     .unwrap();
//!
//! let request = SimulationRequest::new(
//!     "CUST-12345",
//!     LoanType::Auto,
//!     dec!(18000.00),
//!     dec!(650.00),
//!     dec!(20000.00),
//!     36,
//! );
//! let result = engine.calculate(&request).unwrap();
//! assert_eq!(result.new_monthly_payment, dec!(599.42));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod amortization;
pub mod approval;
pub mod builder;
pub mod comparison;
pub mod config;
pub mod engine;
pub mod error;
pub mod pricing;
pub mod recommendation;
pub mod risk;

// Re-exports
pub use builder::SimulationEngineBuilder;
pub use config::{BreakEvenMethod, EngineConfig};
pub use engine::{BatchSimulationResult, SimulationEngine};
pub use error::{EngineError, EngineResult};
