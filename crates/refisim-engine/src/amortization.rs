//! Fixed-rate amortization.
//!
//! The monthly payment uses the standard annuity formula
//!
//! ```text
//! payment = P * r * (1 + r)^n / ((1 + r)^n - 1)
//! ```
//!
//! with `r` the monthly rate held at [`MONTHLY_RATE_SCALE`] fractional digits.
//! A zero rate is a straight-line split of the principal.
//!
//! Only the first [`PAYMENT_PREVIEW_PERIODS`] periods of the schedule are
//! ever simulated.

use refisim_core::money::{round_half_up, round_money};
use refisim_core::PaymentPreview;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::{EngineError, EngineResult};

/// Number of leading periods included in the payment preview.
pub const PAYMENT_PREVIEW_PERIODS: u32 = 3;

/// Fractional digits kept on the monthly rate before compounding.
pub const MONTHLY_RATE_SCALE: u32 = 10;

/// Payment figures for a new loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmortizationSummary {
    /// Monthly installment.
    pub monthly_payment: Decimal,
    /// Interest paid over the full term.
    pub total_interest: Decimal,
    /// Principal plus total interest.
    pub total_amount: Decimal,
    /// First periods of the schedule.
    pub preview: Vec<PaymentPreview>,
}

/// Converts an annual rate in percent to a monthly decimal rate.
#[must_use]
pub fn monthly_rate(annual_rate: Decimal) -> Decimal {
    round_half_up(annual_rate / dec!(100) / dec!(12), MONTHLY_RATE_SCALE)
}

fn check_inputs(principal: Decimal, annual_rate: Decimal, term_months: u32) -> EngineResult<()> {
    if term_months == 0 {
        return Err(EngineError::contract_violation("term must be positive"));
    }
    if principal <= Decimal::ZERO {
        return Err(EngineError::contract_violation(format!(
            "principal must be positive, got {}",
            principal
        )));
    }
    if annual_rate.is_sign_negative() && !annual_rate.is_zero() {
        return Err(EngineError::contract_violation(format!(
            "rate cannot be negative, got {}",
            annual_rate
        )));
    }
    Ok(())
}

/// Computes the monthly payment, rounded to cents.
pub fn monthly_payment(
    principal: Decimal,
    annual_rate: Decimal,
    term_months: u32,
) -> EngineResult<Decimal> {
    check_inputs(principal, annual_rate, term_months)?;

    let rate = monthly_rate(annual_rate);
    if rate.is_zero() {
        return Ok(round_money(principal / Decimal::from(term_months)));
    }

    let factor = (Decimal::ONE + rate)
        .checked_powu(u64::from(term_months))
        .ok_or_else(|| EngineError::contract_violation("rate compounding overflowed"))?;

    let payment = principal
        .checked_mul(rate)
        .and_then(|p| p.checked_mul(factor))
        .and_then(|p| p.checked_div(factor - Decimal::ONE))
        .ok_or_else(|| EngineError::contract_violation("payment calculation overflowed"))?;
    Ok(round_money(payment))
}

/// Simulates the first periods of the schedule.
///
/// Each period charges interest on the running balance at the monthly rate;
/// the rest of the payment reduces the balance.
#[must_use]
pub fn payment_preview(
    principal: Decimal,
    annual_rate: Decimal,
    payment: Decimal,
    term_months: u32,
) -> Vec<PaymentPreview> {
    let rate = monthly_rate(annual_rate);
    let mut balance = round_money(principal);

    (1..=PAYMENT_PREVIEW_PERIODS.min(term_months))
        .map(|payment_number| {
            let interest_amount = round_money(balance * rate);
            let principal_amount = round_money(payment - interest_amount);
            balance = round_money(balance - principal_amount);
            PaymentPreview {
                payment_number,
                principal_amount,
                interest_amount,
                remaining_balance: balance,
            }
        })
        .collect()
}

/// Computes payment, totals and preview for a new loan.
///
/// # Example
///
/// ```rust
/// use refisim_engine::amortization::amortize;
/// use rust_decimal_macros::dec;
///
/// let summary = amortize(dec!(200000.00), dec!(4.50), 240).unwrap();
/// assert_eq!(summary.monthly_payment, dec!(1265.30));
/// assert_eq!(summary.total_interest, dec!(103672.00));
/// assert_eq!(summary.preview.len(), 3);
/// ```
pub fn amortize(
    principal: Decimal,
    annual_rate: Decimal,
    term_months: u32,
) -> EngineResult<AmortizationSummary> {
    let payment = monthly_payment(principal, annual_rate, term_months)?;
    let total_paid = payment
        .checked_mul(Decimal::from(term_months))
        .ok_or_else(|| EngineError::contract_violation("total payment overflowed"))?;
    let total_interest = round_money(total_paid - principal);
    let total_amount = round_money(principal + total_interest);

    Ok(AmortizationSummary {
        monthly_payment: payment,
        total_interest,
        total_amount,
        preview: payment_preview(principal, annual_rate, payment, term_months),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_mortgage() {
        let summary = amortize(dec!(200000.00), dec!(4.50), 240).unwrap();
        assert_eq!(summary.monthly_payment, dec!(1265.30));
        assert_eq!(summary.total_interest, dec!(103672.00));
        assert_eq!(summary.total_amount, dec!(303672.00));

        let first = &summary.preview[0];
        assert_eq!(first.payment_number, 1);
        assert_eq!(first.interest_amount, dec!(750.00));
        assert_eq!(first.principal_amount, dec!(515.30));
        assert_eq!(first.remaining_balance, dec!(199484.70));

        let third = &summary.preview[2];
        assert_eq!(third.payment_number, 3);
        assert_eq!(third.interest_amount, dec!(746.13));
        assert_eq!(third.principal_amount, dec!(519.17));
        assert_eq!(third.remaining_balance, dec!(198448.30));
    }

    #[test]
    fn test_discounted_mortgage() {
        let summary = amortize(dec!(200000.00), dec!(3.75), 240).unwrap();
        assert_eq!(summary.monthly_payment, dec!(1185.78));
        assert_eq!(summary.total_interest, dec!(84587.20));
        assert_eq!(summary.preview[1].interest_amount, dec!(623.25));
        assert_eq!(summary.preview[1].remaining_balance, dec!(198876.69));
    }

    #[test]
    fn test_short_auto_loan() {
        let summary = amortize(dec!(25000.00), dec!(6.50), 60).unwrap();
        assert_eq!(summary.monthly_payment, dec!(489.15));
        assert_eq!(summary.total_interest, dec!(4349.00));
        assert_eq!(summary.preview[0].interest_amount, dec!(135.42));
        assert_eq!(summary.preview[0].principal_amount, dec!(353.73));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let summary = amortize(dec!(15000.00), Decimal::ZERO, 12).unwrap();
        assert_eq!(summary.monthly_payment, dec!(1250.00));
        assert_eq!(summary.total_interest, dec!(0.00));
        assert!(summary.preview.iter().all(|p| p.interest_amount.is_zero()));
        assert_eq!(summary.preview[2].remaining_balance, dec!(11250.00));
    }

    #[test]
    fn test_zero_rate_rounding_residue_is_reported() {
        // 12000 / 36 rounds down to 333.33; the residue surfaces as interest.
        let summary = amortize(dec!(12000.00), Decimal::ZERO, 36).unwrap();
        assert_eq!(summary.monthly_payment, dec!(333.33));
        assert_eq!(summary.total_interest, dec!(-0.12));
    }

    #[test]
    fn test_payment_overflow_is_contract_violation() {
        assert!(matches!(
            monthly_payment(dec!(5000000.00), dec!(200.75), 360),
            Err(EngineError::ContractViolation { .. })
        ));
    }

    #[test]
    fn test_contract_violations() {
        assert!(matches!(
            monthly_payment(dec!(1000), dec!(5), 0),
            Err(EngineError::ContractViolation { .. })
        ));
        assert!(matches!(
            monthly_payment(dec!(-1000), dec!(5), 12),
            Err(EngineError::ContractViolation { .. })
        ));
        assert!(matches!(
            monthly_payment(dec!(1000), dec!(-1), 12),
            Err(EngineError::ContractViolation { .. })
        ));
    }

    #[test]
    fn test_money_scale() {
        let summary = amortize(dec!(1000), dec!(5), 12).unwrap();
        assert_eq!(summary.monthly_payment.scale(), 2);
        assert_eq!(summary.total_amount.scale(), 2);
        assert_eq!(summary.preview[0].remaining_balance.scale(), 2);
    }

    proptest! {
        #[test]
        fn prop_preview_splits_payment(
            principal_cents in 100_000i64..1_000_000_000,
            rate_bp in 1i64..2_000,
            term in 12u32..=360,
        ) {
            let principal = Decimal::new(principal_cents, 2);
            let rate = Decimal::new(rate_bp, 2);
            let summary = amortize(principal, rate, term).unwrap();

            prop_assert!(summary.monthly_payment > Decimal::ZERO);
            prop_assert_eq!(summary.preview.len(), 3);

            let mut previous = principal;
            for period in &summary.preview {
                let split = period.principal_amount + period.interest_amount;
                prop_assert!((split - summary.monthly_payment).abs() <= dec!(0.01));
                prop_assert!(period.remaining_balance < previous);
                previous = period.remaining_balance;
            }
        }
    }
}
