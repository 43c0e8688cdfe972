//! # Refisim Core
//!
//! Core types, rounding rules, and validation for the Refisim credit
//! refinancing simulator.
//!
//! This crate provides the foundational building blocks used throughout Refisim:
//!
//! - **Types**: `SimulationRequest`, `SimulationResult` and the nested
//!   risk, comparison and payment preview records
//! - **Money**: Fixed-scale, round-half-up helpers for money, ratios and probabilities
//! - **Identifiers**: `SimulationId` in the `SIM-XXXXXXXX` format
//! - **Validation**: Field-level checks a request must pass before it reaches the engine
//!
//! ## Design Philosophy
//!
//! - **Exact Arithmetic**: All financial values are `rust_decimal::Decimal`, never `f64`
//! - **Immutable Outputs**: A result is built once and never mutated by the engine
//! - **Explicit Over Implicit**: Rounding scale and strategy are named, not implied
//!
//! ## Example
//!
//! ```rust
//! use refisim_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(round_money(dec!(1265.295)), dec!(1265.30));
//! assert_eq!(round_ratio(dec!(0.19763)), dec!(0.1976));
//! assert_eq!("mortgage".parse::<LoanType>().unwrap(), LoanType::Mortgage);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::money::{round_money, round_probability, round_ratio};
    pub use crate::types::{
        ComparisonMetrics, CurrentLoanSummary, LoanType, PaymentPreview, RiskAssessment,
        RiskLevel, SimulationId, SimulationRequest, SimulationResult, SimulationStatus,
    };
    pub use crate::validation::{Validate, ValidationError};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{
    ComparisonMetrics, CurrentLoanSummary, LoanType, PaymentPreview, RiskAssessment, RiskLevel,
    SimulationId, SimulationRequest, SimulationResult, SimulationStatus,
};
