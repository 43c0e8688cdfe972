//! Risk assessment.
//!
//! Checks run in a fixed order and may only raise the risk level:
//!
//! 1. debt-to-income against the configured thresholds
//! 2. credit score tier
//! 3. size of the new loan relative to the current one

use refisim_core::money::round_ratio;
use refisim_core::{RiskAssessment, RiskLevel, SimulationRequest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::EngineConfig;

/// New loan amounts above this multiple of the current balance are flagged.
pub const LOAN_INCREASE_MULTIPLIER: Decimal = dec!(1.5);

/// Computes the debt-to-income ratio, or zero without a positive income.
#[must_use]
pub fn debt_to_income(monthly_payment: Decimal, monthly_income: Option<Decimal>) -> Decimal {
    match monthly_income {
        Some(income) if income > Decimal::ZERO => round_ratio(monthly_payment / income),
        _ => round_ratio(Decimal::ZERO),
    }
}

/// Assesses the risk of the new loan given its monthly payment.
#[must_use]
pub fn assess_risk(
    config: &EngineConfig,
    request: &SimulationRequest,
    monthly_payment: Decimal,
) -> RiskAssessment {
    let mut level = RiskLevel::Low;
    let mut factors = Vec::new();

    let ratio = debt_to_income(monthly_payment, request.monthly_income);
    let has_income = request.monthly_income.is_some_and(|income| income > Decimal::ZERO);
    if has_income {
        if ratio > config.max_debt_to_income {
            factors.push(format!(
                "Debt-to-income ratio {} exceeds recommended maximum of {}",
                ratio, config.max_debt_to_income
            ));
            level = level.escalate(RiskLevel::High);
        } else if ratio > config.elevated_debt_to_income {
            factors.push(format!(
                "Debt-to-income ratio {} is elevated above {}",
                ratio, config.elevated_debt_to_income
            ));
            level = level.escalate(RiskLevel::Medium);
        }
    }

    match request.credit_score {
        Some(score) if score < 650 => {
            factors.push(format!("Credit score {} is below 650", score));
            level = level.escalate(RiskLevel::High);
        }
        Some(score) if score < 700 => {
            factors.push(format!("Credit score {} is in the fair range (650-699)", score));
            level = level.escalate(RiskLevel::Medium);
        }
        _ => {}
    }

    if request.desired_loan_amount > request.current_loan_amount * LOAN_INCREASE_MULTIPLIER {
        factors.push(
            "Desired loan amount is a significant increase over the current balance".to_string(),
        );
        level = level.escalate(RiskLevel::Medium);
    }

    RiskAssessment {
        risk_level: level,
        debt_to_income_ratio: ratio,
        risk_factors: factors,
    }
}
