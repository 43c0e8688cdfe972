//! Request validation.
//!
//! The engine assumes its input already satisfies these constraints. The
//! server and CLI call [`Validate::validate_or_error`] before handing a
//! request over.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::{fits_scale, MONEY_SCALE};
use crate::types::SimulationRequest;

/// Smallest accepted loan amount.
pub const MIN_LOAN_AMOUNT: Decimal = dec!(1000.00);

/// Largest accepted loan amount.
pub const MAX_LOAN_AMOUNT: Decimal = dec!(10000000.00);

/// Smallest accepted current monthly payment.
pub const MIN_MONTHLY_PAYMENT: Decimal = dec!(100.00);

/// Largest accepted current monthly payment.
pub const MAX_MONTHLY_PAYMENT: Decimal = dec!(1000000.00);

/// Accepted term range in months.
pub const TERM_MONTHS_RANGE: (u32, u32) = (12, 360);

/// Accepted credit score range.
pub const CREDIT_SCORE_RANGE: (u16, u16) = (300, 850);

/// Maximum customer id length.
pub const MAX_CUSTOMER_ID_LEN: usize = 50;

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Trait for validatable inputs.
pub trait Validate {
    /// Validates the value.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the value is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error carrying every violation if invalid.
    fn validate_or_error(&self) -> CoreResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(errors))
        }
    }
}

fn check_amount(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) {
    if value < min || value > max {
        errors.push(ValidationError::with_rule(
            field,
            format!("must be between {} and {}", min, max),
            "range",
        ));
    }
    if !fits_scale(value, MONEY_SCALE) {
        errors.push(ValidationError::with_rule(
            field,
            "must have at most 2 fractional digits",
            "money_scale",
        ));
    }
}

fn is_valid_customer_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_CUSTOMER_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Validate for SimulationRequest {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !is_valid_customer_id(&self.customer_id) {
            errors.push(ValidationError::with_rule(
                "customer_id",
                "must be 1-50 characters of letters, digits, '-' or '_'",
                "customer_id_pattern",
            ));
        }

        check_amount(
            &mut errors,
            "current_loan_amount",
            self.current_loan_amount,
            MIN_LOAN_AMOUNT,
            MAX_LOAN_AMOUNT,
        );
        check_amount(
            &mut errors,
            "current_monthly_payment",
            self.current_monthly_payment,
            MIN_MONTHLY_PAYMENT,
            MAX_MONTHLY_PAYMENT,
        );
        check_amount(
            &mut errors,
            "desired_loan_amount",
            self.desired_loan_amount,
            MIN_LOAN_AMOUNT,
            MAX_LOAN_AMOUNT,
        );

        let (min_term, max_term) = TERM_MONTHS_RANGE;
        if !(min_term..=max_term).contains(&self.desired_term_months) {
            errors.push(ValidationError::with_rule(
                "desired_term_months",
                format!("must be between {} and {}", min_term, max_term),
                "range",
            ));
        }

        if let Some(income) = self.monthly_income {
            if income.is_sign_negative() && !income.is_zero() {
                errors.push(ValidationError::new("income", "cannot be negative"));
            } else if !fits_scale(income, MONEY_SCALE) {
                errors.push(ValidationError::with_rule(
                    "income",
                    "must have at most 2 fractional digits",
                    "money_scale",
                ));
            }
        }

        if let Some(score) = self.credit_score {
            let (min_score, max_score) = CREDIT_SCORE_RANGE;
            if !(min_score..=max_score).contains(&score) {
                errors.push(ValidationError::with_rule(
                    "credit_score",
                    format!("must be between {} and {}", min_score, max_score),
                    "range",
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoanType;

    fn valid_request() -> SimulationRequest {
        SimulationRequest::new(
            "CUST-12345",
            LoanType::Mortgage,
            dec!(150000.00),
            dec!(1300.00),
            dec!(200000.00),
            240,
        )
        .with_monthly_income(dec!(5000.00))
        .with_credit_score(720)
    }

    fn fields(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().is_valid());
        assert!(valid_request().validate_or_error().is_ok());
    }

    #[test]
    fn test_customer_id_pattern() {
        let mut request = valid_request();
        request.customer_id = String::new();
        assert_eq!(fields(&request.validate()), vec!["customer_id"]);

        request.customer_id = "CUST 1".to_string();
        assert_eq!(fields(&request.validate()), vec!["customer_id"]);

        request.customer_id = "a".repeat(51);
        assert!(!request.is_valid());
    }

    #[test]
    fn test_amount_bounds_and_scale() {
        let mut request = valid_request();
        request.current_loan_amount = dec!(999.99);
        request.current_monthly_payment = dec!(99.99);
        request.desired_loan_amount = dec!(200000.005);
        assert_eq!(
            fields(&request.validate()),
            vec![
                "current_loan_amount",
                "current_monthly_payment",
                "desired_loan_amount"
            ]
        );
    }

    #[test]
    fn test_term_bounds() {
        let mut request = valid_request();
        request.desired_term_months = 12;
        assert!(request.is_valid());
        request.desired_term_months = 360;
        assert!(request.is_valid());
        request.desired_term_months = 11;
        assert_eq!(fields(&request.validate()), vec!["desired_term_months"]);
        request.desired_term_months = 361;
        assert!(!request.is_valid());
    }

    #[test]
    fn test_optional_fields() {
        let mut request = valid_request();
        request.monthly_income = Some(dec!(0));
        request.credit_score = Some(300);
        assert!(request.is_valid());

        request.monthly_income = Some(dec!(-1.00));
        request.credit_score = Some(851);
        assert_eq!(fields(&request.validate()), vec!["income", "credit_score"]);
    }

    #[test]
    fn test_validate_or_error_collects_everything() {
        let mut request = valid_request();
        request.customer_id = String::new();
        request.desired_term_months = 0;
        match request.validate_or_error() {
            Err(CoreError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_display_includes_rule() {
        let err = ValidationError::with_rule("credit_score", "must be between 300 and 850", "range");
        assert_eq!(
            err.to_string(),
            "credit_score: must be between 300 and 850 (rule: range)"
        );
    }
}
