//! Simulation request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LoanType;

/// A customer's current loan together with the desired new loan terms.
///
/// Requests reach the engine only after passing
/// [`Validate`](crate::validation::Validate); the engine does not re-validate.
///
/// # Example
///
/// ```rust
/// use refisim_core::{LoanType, SimulationRequest};
/// use rust_decimal_macros::dec;
///
/// let request = SimulationRequest::new(
///     "CUST-12345",
///     LoanType::Mortgage,
///     dec!(180000.00),
///     dec!(1400.00),
///     dec!(200000.00),
///     240,
/// )
/// .with_monthly_income(dec!(6000.00))
/// .with_credit_score(760);
///
/// assert_eq!(request.credit_score, Some(760));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Customer identifier.
    pub customer_id: String,
    /// Outstanding balance of the current loan.
    pub current_loan_amount: Decimal,
    /// Current monthly installment.
    pub current_monthly_payment: Decimal,
    /// Principal of the new loan.
    pub desired_loan_amount: Decimal,
    /// Term of the new loan in months.
    pub desired_term_months: u32,
    /// Product category of the new loan.
    pub loan_type: LoanType,
    /// Gross monthly income, if disclosed.
    #[serde(default, rename = "income", alias = "monthly_income")]
    pub monthly_income: Option<Decimal>,
    /// Credit bureau score (300-850), if disclosed.
    #[serde(default)]
    pub credit_score: Option<u16>,
}

impl SimulationRequest {
    /// Creates a request without the optional income and credit score.
    #[must_use]
    pub fn new(
        customer_id: impl Into<String>,
        loan_type: LoanType,
        current_loan_amount: Decimal,
        current_monthly_payment: Decimal,
        desired_loan_amount: Decimal,
        desired_term_months: u32,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            current_loan_amount,
            current_monthly_payment,
            desired_loan_amount,
            desired_term_months,
            loan_type,
            monthly_income: None,
            credit_score: None,
        }
    }

    /// Sets the disclosed monthly income.
    #[must_use]
    pub fn with_monthly_income(mut self, income: Decimal) -> Self {
        self.monthly_income = Some(income);
        self
    }

    /// Sets the disclosed credit score.
    #[must_use]
    pub fn with_credit_score(mut self, score: u16) -> Self {
        self.credit_score = Some(score);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_wire_names() {
        let json = r#"{
            "customer_id": "CUST-1",
            "current_loan_amount": "150000.00",
            "current_monthly_payment": 1300.5,
            "desired_loan_amount": "200000.00",
            "desired_term_months": 240,
            "loan_type": "MORTGAGE",
            "income": "5000.00",
            "credit_score": 720
        }"#;
        let request: SimulationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.current_monthly_payment, dec!(1300.5));
        assert_eq!(request.monthly_income, Some(dec!(5000.00)));
        assert_eq!(request.loan_type, LoanType::Mortgage);
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let json = r#"{
            "customer_id": "CUST-1",
            "current_loan_amount": "15000",
            "current_monthly_payment": "400",
            "desired_loan_amount": "15000",
            "desired_term_months": 36,
            "loan_type": "AUTO"
        }"#;
        let request: SimulationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.monthly_income, None);
        assert_eq!(request.credit_score, None);
    }
}
