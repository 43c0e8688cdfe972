//! Next steps and offer conditions.

use refisim_core::RiskLevel;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Probability at or above which the customer is told to apply.
pub const APPLY_THRESHOLD: Decimal = dec!(0.75);

/// Probability at or above which the customer is told to improve the offer.
pub const IMPROVE_THRESHOLD: Decimal = dec!(0.50);

const APPLY_STEPS: [&str; 2] = [
    "Gather recent pay stubs, tax returns and bank statements",
    "Submit the formal refinancing application",
];

const IMPROVE_STEPS: [&str; 3] = [
    "Review your credit report and dispute any errors",
    "Consider a smaller loan amount or a longer term",
    "Schedule a consultation with a loan officer",
];

const REBUILD_STEPS: [&str; 3] = [
    "Work on improving your credit score before reapplying",
    "Pay down existing debt to lower your debt-to-income ratio",
    "Consider applying with a co-signer",
];

const HIGH_RISK_CONDITIONS: [&str; 2] = [
    "Additional collateral or co-signer required",
    "Manual underwriting review required",
];

const FAIR_CREDIT_CONDITION: &str = "Credit history review required";

const BASELINE_CONDITIONS: [&str; 2] = [
    "Property appraisal required",
    "Income and employment verification",
];

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Recommended next steps for an approval probability.
#[must_use]
pub fn next_steps(probability: Decimal) -> Vec<String> {
    if probability >= APPLY_THRESHOLD {
        to_owned(&APPLY_STEPS)
    } else if probability >= IMPROVE_THRESHOLD {
        to_owned(&IMPROVE_STEPS)
    } else {
        to_owned(&REBUILD_STEPS)
    }
}

/// Conditions attached to an offer.
///
/// Risk and credit conditions come first; the baseline conditions are
/// always last.
#[must_use]
pub fn conditions(level: RiskLevel, credit_score: Option<u16>) -> Vec<String> {
    let mut conditions = Vec::with_capacity(5);
    if level == RiskLevel::High {
        conditions.extend(to_owned(&HIGH_RISK_CONDITIONS));
    }
    if credit_score.is_some_and(|score| score < 700) {
        conditions.push(FAIR_CREDIT_CONDITION.to_string());
    }
    conditions.extend(to_owned(&BASELINE_CONDITIONS));
    conditions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_steps_tiers() {
        assert_eq!(next_steps(dec!(0.95)).len(), 2);
        assert_eq!(next_steps(dec!(0.75)).len(), 2);
        assert_eq!(next_steps(dec!(0.74)).len(), 3);
        assert_eq!(next_steps(dec!(0.50))[0], IMPROVE_STEPS[0]);
        assert_eq!(next_steps(dec!(0.45))[0], REBUILD_STEPS[0]);
    }

    #[test]
    fn test_baseline_conditions_always_last() {
        let low = conditions(RiskLevel::Low, Some(760));
        assert_eq!(low.len(), 2);
        assert!(low[0].contains("appraisal required"));
        assert!(low[1].contains("employment verification"));

        let high = conditions(RiskLevel::High, Some(640));
        assert_eq!(high.len(), 5);
        assert_eq!(high[2], FAIR_CREDIT_CONDITION);
        assert_eq!(&high[3..], &low[..]);
    }

    #[test]
    fn test_missing_score_adds_no_credit_condition() {
        assert_eq!(conditions(RiskLevel::Medium, None).len(), 2);
        assert_eq!(conditions(RiskLevel::Medium, Some(699)).len(), 3);
        assert_eq!(conditions(RiskLevel::Medium, Some(700)).len(), 2);
    }
}
