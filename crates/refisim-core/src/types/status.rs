//! Simulation outcome status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Outcome category assigned from the approval probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulationStatus {
    /// Offer is likely to be approved as calculated.
    Calculated,
    /// Offer needs manual review.
    Pending,
    /// Offer is unlikely to be approved.
    Rejected,
}

impl SimulationStatus {
    /// Returns the canonical upper-case code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SimulationStatus::Calculated => "CALCULATED",
            SimulationStatus::Pending => "PENDING",
            SimulationStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SimulationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CALCULATED" => Ok(SimulationStatus::Calculated),
            "PENDING" => Ok(SimulationStatus::Pending),
            "REJECTED" => Ok(SimulationStatus::Rejected),
            _ => Err(CoreError::unknown_status(s)),
        }
    }
}
