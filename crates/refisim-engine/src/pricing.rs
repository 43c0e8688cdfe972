//! Interest rate pricing.
//!
//! The rate is the configured base rate plus three independent additive
//! adjustments, applied in a fixed order:
//!
//! 1. credit score tier
//! 2. loan type
//! 3. loan size
//!
//! The sum is then floored at the configured minimum rate.

use refisim_core::money::round_rate;
use refisim_core::LoanType;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::EngineConfig;

/// Loan amounts strictly above this receive the large-loan discount.
pub const LARGE_LOAN_THRESHOLD: Decimal = dec!(500000);

/// Prices the annual rate (percent) for a new loan.
///
/// # Example
///
/// ```rust
/// use refisim_core::LoanType;
/// use refisim_engine::{pricing::price_rate, EngineConfig};
/// use rust_decimal_macros::dec;
///
/// let config = EngineConfig::default();
/// let rate = price_rate(&config, LoanType::Mortgage, Some(760), dec!(200000.00));
/// assert_eq!(rate, dec!(3.75));
/// ```
#[must_use]
pub fn price_rate(
    config: &EngineConfig,
    loan_type: LoanType,
    credit_score: Option<u16>,
    loan_amount: Decimal,
) -> Decimal {
    let mut rate = config.base_rate;
    rate += credit_score_adjustment(credit_score);
    rate += loan_type_adjustment(loan_type);
    rate += loan_size_adjustment(loan_amount);

    round_rate(rate.max(config.min_rate))
}

/// Credit score tier adjustment in percentage points.
#[must_use]
pub fn credit_score_adjustment(credit_score: Option<u16>) -> Decimal {
    match credit_score {
        Some(score) if score >= 750 => dec!(-0.50),
        Some(score) if score < 650 => dec!(1.50),
        Some(score) if score < 700 => dec!(0.75),
        _ => Decimal::ZERO,
    }
}

/// Loan type adjustment in percentage points.
#[must_use]
pub fn loan_type_adjustment(loan_type: LoanType) -> Decimal {
    match loan_type {
        LoanType::Mortgage => dec!(-0.25),
        LoanType::Personal => dec!(2.00),
        LoanType::Auto => dec!(0.50),
        LoanType::Business => dec!(1.00),
        LoanType::Student => Decimal::ZERO,
    }
}

/// Loan size adjustment in percentage points.
#[must_use]
pub fn loan_size_adjustment(loan_amount: Decimal) -> Decimal {
    if loan_amount > LARGE_LOAN_THRESHOLD {
        dec!(-0.25)
    } else {
        Decimal::ZERO
    }
}
