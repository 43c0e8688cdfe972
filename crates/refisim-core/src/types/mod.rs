//! Domain types for refinancing simulations.
//!
//! - [`SimulationRequest`]: Current loan plus desired new terms
//! - [`SimulationResult`]: Priced, risk-scored offer
//! - [`LoanType`]: Loan product category
//! - [`RiskLevel`] / [`RiskAssessment`]: Underwriting risk summary
//! - [`SimulationStatus`]: Outcome category of a simulation
//! - [`SimulationId`]: `SIM-XXXXXXXX` identifier

mod ids;
mod loan;
mod request;
mod result;
mod risk;
mod status;

pub use ids::SimulationId;
pub use loan::LoanType;
pub use request::SimulationRequest;
pub use result::{ComparisonMetrics, CurrentLoanSummary, PaymentPreview, SimulationResult};
pub use risk::{RiskAssessment, RiskLevel};
pub use status::SimulationStatus;
