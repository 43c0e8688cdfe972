//! Risk level and assessment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical underwriting risk.
///
/// Ordered `Low < Medium < High`; escalation only ever moves up.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// No risk check fired.
    #[default]
    Low,
    /// At least one moderate concern.
    Medium,
    /// At least one serious concern.
    High,
}

impl RiskLevel {
    /// Returns the higher of the current level and `to`.
    ///
    /// A `High` level is never lowered by a later `Medium` finding.
    #[must_use]
    pub fn escalate(self, to: RiskLevel) -> RiskLevel {
        self.max(to)
    }

    /// Returns the canonical upper-case code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Risk summary for one simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Overall risk level.
    pub risk_level: RiskLevel,
    /// New monthly payment divided by monthly income, four fractional digits.
    pub debt_to_income_ratio: Decimal,
    /// Human-readable findings, in the order the checks ran.
    pub risk_factors: Vec<String>,
}
