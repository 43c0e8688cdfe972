//! Approval probability and status.

use refisim_core::money::round_probability;
use refisim_core::{RiskLevel, SimulationStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Probability at or above which a simulation is CALCULATED.
pub const CALCULATED_THRESHOLD: Decimal = dec!(0.80);

/// Probability at or above which a simulation is PENDING rather than REJECTED.
pub const PENDING_THRESHOLD: Decimal = dec!(0.50);

/// Base probability for each risk level.
#[must_use]
pub fn base_probability(level: RiskLevel) -> Decimal {
    match level {
        RiskLevel::Low => dec!(0.85),
        RiskLevel::Medium => dec!(0.70),
        RiskLevel::High => dec!(0.45),
    }
}

/// Estimates the approval probability, clamped to `[0.00, 1.00]`.
#[must_use]
pub fn estimate_approval(level: RiskLevel, credit_score: Option<u16>) -> Decimal {
    let adjustment = match credit_score {
        Some(score) if score >= 750 => dec!(0.10),
        Some(score) if score < 600 => dec!(-0.20),
        _ => Decimal::ZERO,
    };

    let probability = (base_probability(level) + adjustment).clamp(Decimal::ZERO, Decimal::ONE);
    round_probability(probability)
}

/// Maps an approval probability to a status.
#[must_use]
pub fn resolve_status(probability: Decimal) -> SimulationStatus {
    if probability >= CALCULATED_THRESHOLD {
        SimulationStatus::Calculated
    } else if probability >= PENDING_THRESHOLD {
        SimulationStatus::Pending
    } else {
        SimulationStatus::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bases_are_independent() {
        assert_eq!(estimate_approval(RiskLevel::Low, None), dec!(0.85));
        assert_eq!(estimate_approval(RiskLevel::Medium, Some(700)), dec!(0.70));
        assert_eq!(estimate_approval(RiskLevel::High, Some(620)), dec!(0.45));
    }

    #[test]
    fn test_score_adjustments() {
        assert_eq!(estimate_approval(RiskLevel::Low, Some(750)), dec!(0.95));
        assert_eq!(estimate_approval(RiskLevel::Low, Some(749)), dec!(0.85));
        assert_eq!(estimate_approval(RiskLevel::High, Some(599)), dec!(0.25));
        assert_eq!(estimate_approval(RiskLevel::High, Some(600)), dec!(0.45));
    }

    #[test]
    fn test_probability_scale() {
        assert_eq!(estimate_approval(RiskLevel::Low, Some(800)).to_string(), "0.95");
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(resolve_status(dec!(0.80)), SimulationStatus::Calculated);
        assert_eq!(resolve_status(dec!(0.79)), SimulationStatus::Pending);
        assert_eq!(resolve_status(dec!(0.50)), SimulationStatus::Pending);
        assert_eq!(resolve_status(dec!(0.49)), SimulationStatus::Rejected);
        assert_eq!(resolve_status(Decimal::ZERO), SimulationStatus::Rejected);
    }

    fn any_level() -> impl Strategy<Value = RiskLevel> {
        prop_oneof![
            Just(RiskLevel::Low),
            Just(RiskLevel::Medium),
            Just(RiskLevel::High)
        ]
    }

    proptest! {
        #[test]
        fn prop_probability_in_unit_interval(
            level in any_level(),
            score in proptest::option::of(300u16..=850),
        ) {
            let p = estimate_approval(level, score);
            prop_assert!(p >= Decimal::ZERO && p <= Decimal::ONE);
        }
    }
}
