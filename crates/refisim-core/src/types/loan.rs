//! Loan product categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Category of the loan being refinanced.
///
/// Serialized in upper case (`"MORTGAGE"`); parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanType {
    /// Unsecured personal loan.
    Personal,
    /// Residential mortgage.
    Mortgage,
    /// Vehicle loan.
    Auto,
    /// Small business loan.
    Business,
    /// Student loan.
    Student,
}

impl LoanType {
    /// All supported loan types, in declaration order.
    pub const ALL: [LoanType; 5] = [
        LoanType::Personal,
        LoanType::Mortgage,
        LoanType::Auto,
        LoanType::Business,
        LoanType::Student,
    ];

    /// Returns the canonical upper-case code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            LoanType::Personal => "PERSONAL",
            LoanType::Mortgage => "MORTGAGE",
            LoanType::Auto => "AUTO",
            LoanType::Business => "BUSINESS",
            LoanType::Student => "STUDENT",
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LoanType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        LoanType::ALL
            .into_iter()
            .find(|loan_type| loan_type.code() == normalized)
            .ok_or_else(|| CoreError::unknown_loan_type(s))
    }
}
