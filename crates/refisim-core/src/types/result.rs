//! Simulation result and its nested records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LoanType, RiskAssessment, SimulationId, SimulationStatus};

/// Snapshot of the loan being refinanced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentLoanSummary {
    /// Remaining balance on the current loan.
    pub remaining_balance: Decimal,
    /// Reference annual rate assumed for the current loan (percent).
    pub current_rate: Decimal,
    /// Estimated months left at the current payment, if it ever pays off.
    pub remaining_term_months: Option<u32>,
}

/// One period of the payment schedule preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPreview {
    /// 1-based payment number.
    pub payment_number: u32,
    /// Principal portion of the payment.
    pub principal_amount: Decimal,
    /// Interest portion of the payment.
    pub interest_amount: Decimal,
    /// Balance after the payment.
    pub remaining_balance: Decimal,
}

/// Differences between the offer and the current loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    /// New rate minus current rate (percentage points).
    pub rate_difference: Decimal,
    /// New payment minus current payment.
    pub payment_difference: Decimal,
    /// Negated total savings over the new term.
    pub total_cost_difference: Decimal,
    /// Months until savings repay refinancing costs; `None` if never.
    pub break_even_months: Option<u32>,
}

/// A priced, risk-scored refinancing offer.
///
/// Built exactly once per request by the engine and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Unique simulation identifier.
    pub simulation_id: SimulationId,
    /// Customer identifier, echoed from the request.
    pub customer_id: String,
    /// Outcome category.
    pub status: SimulationStatus,
    /// Loan type, echoed from the request.
    pub loan_type: LoanType,
    /// Principal of the new loan (the desired loan amount).
    pub new_loan_amount: Decimal,
    /// Annual rate of the new loan (percent).
    pub new_interest_rate: Decimal,
    /// Monthly installment of the new loan.
    pub new_monthly_payment: Decimal,
    /// Term of the new loan in months.
    pub term_months: u32,
    /// Interest paid over the full term.
    pub total_interest: Decimal,
    /// Principal plus interest.
    pub total_amount: Decimal,
    /// Current payment minus new payment.
    pub monthly_savings: Decimal,
    /// Monthly savings over the full new term.
    pub total_savings: Decimal,
    /// Up-front refinancing fee.
    pub processing_fee: Decimal,
    /// Estimated approval probability in `[0.00, 1.00]`.
    pub approval_probability: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Advisory offer expiry.
    pub expires_at: DateTime<Utc>,
    /// Summary of the current loan.
    pub current_loan_summary: CurrentLoanSummary,
    /// Risk findings.
    pub risk_assessment: RiskAssessment,
    /// First payments of the new schedule.
    pub payment_schedule_preview: Vec<PaymentPreview>,
    /// Comparison with the current loan.
    pub comparison_metrics: ComparisonMetrics,
    /// Recommended next steps for the customer.
    pub next_steps: Vec<String>,
    /// Conditions attached to the offer.
    pub conditions: Vec<String>,
    /// Wall-clock duration of the pipeline run.
    pub processing_time_ms: u64,
}

impl SimulationResult {
    /// Returns true once `now` is past the advisory expiry.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
