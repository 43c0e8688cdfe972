//! Comparison of the offer against the customer's current loan.

use refisim_core::money::{round_money, round_rate};
use refisim_core::{ComparisonMetrics, CurrentLoanSummary, SimulationRequest};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

use crate::amortization::monthly_rate;
use crate::config::{BreakEvenMethod, EngineConfig};

/// Savings of the new payment over the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Savings {
    /// Current payment minus new payment.
    pub monthly: Decimal,
    /// Monthly savings over the full new term.
    pub total: Decimal,
}

impl Savings {
    /// Computes savings for a new payment over `term_months`.
    #[must_use]
    pub fn new(current_payment: Decimal, new_payment: Decimal, term_months: u32) -> Self {
        let monthly = round_money(current_payment - new_payment);
        Self {
            monthly,
            total: round_money(monthly * Decimal::from(term_months)),
        }
    }
}

/// Estimates the months left on a loan at a fixed payment.
///
/// Inverts the annuity formula: `n = -ln(1 - r*B/P) / ln(1 + r)`. Returns
/// `None` when the payment never retires the balance.
#[must_use]
pub fn estimate_remaining_term(
    balance: Decimal,
    annual_rate: Decimal,
    payment: Decimal,
) -> Option<u32> {
    if payment <= Decimal::ZERO {
        return None;
    }
    if balance <= Decimal::ZERO {
        return Some(0);
    }

    let rate = monthly_rate(annual_rate);
    if rate.is_zero() {
        return (balance / payment).ceil().to_u32();
    }

    let interest_share = rate * balance / payment;
    if interest_share >= Decimal::ONE {
        return None;
    }

    let numerator = (Decimal::ONE - interest_share).checked_ln()?;
    let denominator = (Decimal::ONE + rate).checked_ln()?;
    (-numerator / denominator).ceil().to_u32()
}

/// Summarizes the current loan at the reference rate.
#[must_use]
pub fn summarize_current_loan(
    config: &EngineConfig,
    request: &SimulationRequest,
) -> CurrentLoanSummary {
    CurrentLoanSummary {
        remaining_balance: round_money(request.current_loan_amount),
        current_rate: round_rate(config.reference_current_rate),
        remaining_term_months: estimate_remaining_term(
            request.current_loan_amount,
            config.reference_current_rate,
            request.current_monthly_payment,
        ),
    }
}

/// Months of savings needed to break even on refinancing.
#[must_use]
pub fn break_even_months(
    method: BreakEvenMethod,
    processing_fee: Decimal,
    monthly_savings: Decimal,
) -> Option<u32> {
    match method {
        BreakEvenMethod::Reference { months } => Some(months),
        BreakEvenMethod::FeePayback if monthly_savings > Decimal::ZERO => {
            (processing_fee / monthly_savings).ceil().to_u32()
        }
        BreakEvenMethod::FeePayback => None,
    }
}

/// Builds the comparison metrics for an offer.
#[must_use]
pub fn compare(
    config: &EngineConfig,
    request: &SimulationRequest,
    new_rate: Decimal,
    new_payment: Decimal,
    savings: Savings,
    processing_fee: Decimal,
) -> ComparisonMetrics {
    ComparisonMetrics {
        rate_difference: round_rate(new_rate - config.reference_current_rate),
        payment_difference: round_money(new_payment - request.current_monthly_payment),
        total_cost_difference: round_money(-savings.total),
        break_even_months: break_even_months(config.break_even, processing_fee, savings.monthly),
    }
}
