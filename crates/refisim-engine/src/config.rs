//! Engine configuration.
//!
//! Every constant the pipeline reads lives here and is passed in explicitly,
//! so alternate parameterizations can be tested side by side.

use refisim_core::validation::{Validate, ValidationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How `break_even_months` is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum BreakEvenMethod {
    /// A fixed reference figure, independent of the offer.
    Reference {
        /// Reported months.
        months: u32,
    },
    /// Months of savings needed to repay the processing fee.
    FeePayback,
}

impl Default for BreakEvenMethod {
    fn default() -> Self {
        BreakEvenMethod::Reference {
            months: DEFAULT_BREAK_EVEN_MONTHS,
        }
    }
}

/// Reference break-even figure.
pub const DEFAULT_BREAK_EVEN_MONTHS: u32 = 8;

/// Highest configurable annual rate (percent).
pub const MAX_ANNUAL_RATE: Decimal = dec!(100);

/// Longest configurable offer validity.
pub const MAX_OFFER_VALIDITY_DAYS: u32 = 3650;

/// Simulation engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Annual base rate before adjustments (percent).
    #[serde(default = "default_base_rate")]
    pub base_rate: Decimal,

    /// Hard floor for the priced rate (percent).
    #[serde(default = "default_min_rate")]
    pub min_rate: Decimal,

    /// Debt-to-income ratio above which risk is HIGH.
    #[serde(default = "default_max_debt_to_income")]
    pub max_debt_to_income: Decimal,

    /// Debt-to-income ratio above which risk is MEDIUM.
    #[serde(default = "default_elevated_debt_to_income")]
    pub elevated_debt_to_income: Decimal,

    /// Processing fee as a fraction of the new loan amount.
    #[serde(default = "default_processing_fee_rate")]
    pub processing_fee_rate: Decimal,

    /// Rate assumed for the customer's current loan (percent).
    #[serde(default = "default_reference_current_rate")]
    pub reference_current_rate: Decimal,

    /// Days until an offer expires.
    #[serde(default = "default_offer_validity_days")]
    pub offer_validity_days: u32,

    /// Break-even reporting method.
    #[serde(default)]
    pub break_even: BreakEvenMethod,
}

fn default_base_rate() -> Decimal {
    dec!(4.50)
}

fn default_min_rate() -> Decimal {
    dec!(2.00)
}

fn default_max_debt_to_income() -> Decimal {
    dec!(0.43)
}

fn default_elevated_debt_to_income() -> Decimal {
    dec!(0.36)
}

fn default_processing_fee_rate() -> Decimal {
    dec!(0.01)
}

fn default_reference_current_rate() -> Decimal {
    dec!(6.25)
}

fn default_offer_validity_days() -> u32 {
    30
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_rate: default_base_rate(),
            min_rate: default_min_rate(),
            max_debt_to_income: default_max_debt_to_income(),
            elevated_debt_to_income: default_elevated_debt_to_income(),
            processing_fee_rate: default_processing_fee_rate(),
            reference_current_rate: default_reference_current_rate(),
            offer_validity_days: default_offer_validity_days(),
            break_even: BreakEvenMethod::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the base rate.
    #[must_use]
    pub fn with_base_rate(mut self, rate: Decimal) -> Self {
        self.base_rate = rate;
        self
    }

    /// Sets the maximum debt-to-income ratio.
    #[must_use]
    pub fn with_max_debt_to_income(mut self, ratio: Decimal) -> Self {
        self.max_debt_to_income = ratio;
        self
    }

    /// Sets the processing fee rate.
    #[must_use]
    pub fn with_processing_fee_rate(mut self, rate: Decimal) -> Self {
        self.processing_fee_rate = rate;
        self
    }

    /// Sets the break-even method.
    #[must_use]
    pub fn with_break_even(mut self, method: BreakEvenMethod) -> Self {
        self.break_even = method;
        self
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("min_rate", self.min_rate),
            ("base_rate", self.base_rate),
            ("reference_current_rate", self.reference_current_rate),
        ] {
            if value.is_sign_negative() {
                errors.push(ValidationError::with_rule(
                    field,
                    "Rate cannot be negative",
                    "non_negative",
                ));
            } else if value > MAX_ANNUAL_RATE {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Rate cannot exceed {}%", MAX_ANNUAL_RATE),
                    "range",
                ));
            }
        }

        if self.max_debt_to_income <= Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "max_debt_to_income",
                "Maximum debt-to-income must be positive",
                "positive",
            ));
        }

        if self.elevated_debt_to_income.is_sign_negative() {
            errors.push(ValidationError::with_rule(
                "elevated_debt_to_income",
                "Elevated debt-to-income cannot be negative",
                "non_negative",
            ));
        } else if self.elevated_debt_to_income > self.max_debt_to_income {
            errors.push(ValidationError::with_rule(
                "elevated_debt_to_income",
                "Elevated threshold cannot exceed the maximum",
                "ordered_thresholds",
            ));
        }

        if self.processing_fee_rate.is_sign_negative() || self.processing_fee_rate >= Decimal::ONE
        {
            errors.push(ValidationError::with_rule(
                "processing_fee_rate",
                "Processing fee rate must be in [0, 1)",
                "valid_fee_rate",
            ));
        }

        if !(1..=MAX_OFFER_VALIDITY_DAYS).contains(&self.offer_validity_days) {
            errors.push(ValidationError::with_rule(
                "offer_validity_days",
                format!(
                    "Offer validity must be between 1 and {} days",
                    MAX_OFFER_VALIDITY_DAYS
                ),
                "range",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.base_rate, dec!(4.50));
        assert_eq!(config.min_rate, dec!(2.00));
        assert_eq!(config.max_debt_to_income, dec!(0.43));
        assert_eq!(config.offer_validity_days, 30);
        assert_eq!(config.break_even, BreakEvenMethod::Reference { months: 8 });
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            base_rate = "5.00"

            [break_even]
            method = "fee_payback"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_rate, dec!(5.00));
        assert_eq!(config.min_rate, dec!(2.00));
        assert_eq!(config.break_even, BreakEvenMethod::FeePayback);
    }

    #[test]
    fn test_reference_break_even_from_json() {
        let method: BreakEvenMethod =
            serde_json::from_str(r#"{"method": "reference", "months": 12}"#).unwrap();
        assert_eq!(method, BreakEvenMethod::Reference { months: 12 });
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let config = EngineConfig {
            base_rate: dec!(200),
            reference_current_rate: dec!(-1),
            elevated_debt_to_income: dec!(-0.10),
            offer_validity_days: 100_000_000,
            ..EngineConfig::default()
        };
        let errors = config.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "base_rate",
                "reference_current_rate",
                "elevated_debt_to_income",
                "offer_validity_days"
            ]
        );
        assert_eq!(errors[0].rule.as_deref(), Some("range"));
        assert_eq!(errors[1].rule.as_deref(), Some("non_negative"));
        assert_eq!(errors[2].rule.as_deref(), Some("non_negative"));
        assert_eq!(errors[3].rule.as_deref(), Some("range"));

        let upper = EngineConfig {
            min_rate: MAX_ANNUAL_RATE,
            base_rate: MAX_ANNUAL_RATE,
            offer_validity_days: MAX_OFFER_VALIDITY_DAYS,
            ..EngineConfig::default()
        };
        assert!(upper.is_valid());
    }

    #[test]
    fn test_invalid_config() {
        let config = EngineConfig {
            elevated_debt_to_income: dec!(0.50),
            processing_fee_rate: dec!(1.5),
            offer_validity_days: 0,
            ..EngineConfig::default()
        };
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "elevated_debt_to_income",
                "processing_fee_rate",
                "offer_validity_days"
            ]
        );
    }
}
