//! The simulation engine.

use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;
use refisim_core::money::round_money;
use refisim_core::validation::Validate;
use refisim_core::{SimulationId, SimulationRequest, SimulationResult};
use tracing::{debug, info};

use crate::amortization::amortize;
use crate::approval::{estimate_approval, resolve_status};
use crate::comparison::{compare, summarize_current_loan, Savings};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::pricing::price_rate;
use crate::recommendation::{conditions, next_steps};
use crate::risk::assess_risk;

/// Runs the simulation pipeline.
///
/// The engine holds only immutable configuration, so a single instance can
/// be shared across threads and called concurrently.
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    config: EngineConfig,
}

/// Outcome of a batch run.
#[derive(Debug)]
pub struct BatchSimulationResult {
    /// Per-request results, in input order.
    pub results: Vec<EngineResult<SimulationResult>>,
    /// Number of successful simulations.
    pub succeeded: usize,
    /// Number of failed simulations.
    pub failed: usize,
    /// Wall-clock duration of the batch.
    pub elapsed_ms: u64,
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl SimulationEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(EngineError::InvalidConfig(errors));
        }
        Ok(Self { config })
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Simulates a refinancing offer created now.
    ///
    /// # Example
    ///
    /// ```rust
    /// use refisim_core::{LoanType, SimulationRequest, SimulationStatus};
    /// use refisim_engine::SimulationEngine;
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
    /// let result = SimulationEngine::default().calculate(&request).unwrap();
    /// assert_eq!(result.new_interest_rate, dec!(3.75));
    /// assert_eq!(result.new_monthly_payment, dec!(1185.78));
    /// assert_eq!(result.status, SimulationStatus::Calculated);
    /// ```
    pub fn calculate(&self, request: &SimulationRequest) -> EngineResult<SimulationResult> {
        self.calculate_at(request, Utc::now())
    }

    /// Simulates a refinancing offer with an explicit creation time.
    pub fn calculate_at(
        &self,
        request: &SimulationRequest,
        created_at: DateTime<Utc>,
    ) -> EngineResult<SimulationResult> {
        let start = Instant::now();
        let config = &self.config;

        if request.current_loan_amount.is_sign_negative()
            || request.current_monthly_payment.is_sign_negative()
        {
            return Err(EngineError::contract_violation(
                "current loan figures cannot be negative",
            ));
        }
        if request
            .monthly_income
            .is_some_and(|income| income.is_sign_negative() && !income.is_zero())
        {
            return Err(EngineError::contract_violation("income cannot be negative"));
        }

        let rate = price_rate(
            config,
            request.loan_type,
            request.credit_score,
            request.desired_loan_amount,
        );
        let amortization = amortize(
            request.desired_loan_amount,
            rate,
            request.desired_term_months,
        )?;
        let payment = amortization.monthly_payment;

        let risk = assess_risk(config, request, payment);
        let probability = estimate_approval(risk.risk_level, request.credit_score);
        let status = resolve_status(probability);

        debug!(
            customer_id = %request.customer_id,
            %rate,
            %payment,
            risk_level = %risk.risk_level,
            %probability,
            "Priced simulation"
        );

        let savings = Savings::new(
            request.current_monthly_payment,
            payment,
            request.desired_term_months,
        );
        let processing_fee = round_money(request.desired_loan_amount * config.processing_fee_rate);
        let expires_at = created_at
            .checked_add_signed(Duration::days(i64::from(config.offer_validity_days)))
            .ok_or_else(|| EngineError::contract_violation("offer expiry is out of range"))?;
        let comparison = compare(config, request, rate, payment, savings, processing_fee);

        let result = SimulationResult {
            simulation_id: SimulationId::generate(),
            customer_id: request.customer_id.clone(),
            status,
            loan_type: request.loan_type,
            new_loan_amount: round_money(request.desired_loan_amount),
            new_interest_rate: rate,
            new_monthly_payment: payment,
            term_months: request.desired_term_months,
            total_interest: amortization.total_interest,
            total_amount: amortization.total_amount,
            monthly_savings: savings.monthly,
            total_savings: savings.total,
            processing_fee,
            approval_probability: probability,
            created_at,
            expires_at,
            current_loan_summary: summarize_current_loan(config, request),
            next_steps: next_steps(probability),
            conditions: conditions(risk.risk_level, request.credit_score),
            risk_assessment: risk,
            payment_schedule_preview: amortization.preview,
            comparison_metrics: comparison,
            processing_time_ms: elapsed_ms(start),
        };

        info!(
            simulation_id = %result.simulation_id,
            customer_id = %result.customer_id,
            status = %result.status,
            "Simulation calculated"
        );

        Ok(result)
    }

    /// Simulates many requests in parallel, returning results in input order.
    pub fn calculate_batch(
        &self,
        requests: &[SimulationRequest],
    ) -> Vec<EngineResult<SimulationResult>> {
        requests
            .par_iter()
            .map(|request| self.calculate(request))
            .collect()
    }

    /// Simulates a batch and collects statistics.
    pub fn calculate_batch_with_stats(&self, requests: &[SimulationRequest]) -> BatchSimulationResult {
        let start = Instant::now();
        let results = self.calculate_batch(requests);
        let succeeded = results.iter().filter(|r| r.is_ok()).count();

        let batch = BatchSimulationResult {
            failed: results.len() - succeeded,
            succeeded,
            results,
            elapsed_ms: elapsed_ms(start),
        };

        info!(
            succeeded = batch.succeeded,
            failed = batch.failed,
            elapsed_ms = batch.elapsed_ms,
            "Batch simulation finished"
        );

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BreakEvenMethod;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use refisim_core::{LoanType, RiskLevel, SimulationStatus};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn prime_mortgage() -> SimulationRequest {
        SimulationRequest::new(
            "CUST-12345",
            LoanType::Mortgage,
            dec!(180000.00),
            dec!(1400.00),
            dec!(200000.00),
            240,
        )
        .with_monthly_income(dec!(6000.00))
        .with_credit_score(760)
    }

    fn subprime_personal() -> SimulationRequest {
        SimulationRequest::new(
            "CUST-777",
            LoanType::Personal,
            dec!(10000.00),
            dec!(450.00),
            dec!(30000.00),
            60,
        )
        .with_monthly_income(dec!(3000.00))
        .with_credit_score(640)
    }

    #[test]
    fn test_prime_mortgage() {
        let engine = SimulationEngine::default();
        let result = engine.calculate_at(&prime_mortgage(), created_at()).unwrap();

        assert_eq!(result.new_interest_rate, dec!(3.75));
        assert_eq!(result.new_monthly_payment, dec!(1185.78));
        assert_eq!(result.total_interest, dec!(84587.20));
        assert_eq!(result.total_amount, dec!(284587.20));
        assert_eq!(result.monthly_savings, dec!(214.22));
        assert_eq!(result.total_savings, dec!(51412.80));
        assert_eq!(result.processing_fee, dec!(2000.00));

        assert_eq!(result.risk_assessment.risk_level, RiskLevel::Low);
        assert_eq!(result.risk_assessment.debt_to_income_ratio, dec!(0.1976));
        assert_eq!(result.approval_probability, dec!(0.95));
        assert_eq!(result.status, SimulationStatus::Calculated);

        assert_eq!(result.comparison_metrics.rate_difference, dec!(-2.50));
        assert_eq!(result.comparison_metrics.payment_difference, dec!(-214.22));
        assert_eq!(result.comparison_metrics.total_cost_difference, dec!(-51412.80));
        assert_eq!(result.comparison_metrics.break_even_months, Some(8));

        assert_eq!(result.current_loan_summary.remaining_term_months, Some(214));
        assert_eq!(result.payment_schedule_preview.len(), 3);
        assert_eq!(result.next_steps.len(), 2);
        assert_eq!(result.conditions.len(), 2);
        assert_eq!(result.expires_at, created_at() + Duration::days(30));
        assert!(!result.is_expired_at(created_at() + Duration::days(30)));
        assert!(result.is_expired_at(created_at() + Duration::days(31)));
    }

    #[test]
    fn test_subprime_personal_is_rejected() {
        let result = SimulationEngine::default()
            .calculate(&subprime_personal())
            .unwrap();

        assert_eq!(result.new_interest_rate, dec!(8.00));
        assert_eq!(result.new_monthly_payment, dec!(608.29));
        assert_eq!(result.risk_assessment.debt_to_income_ratio, dec!(0.2028));
        assert_eq!(result.risk_assessment.risk_level, RiskLevel::High);
        assert_eq!(result.risk_assessment.risk_factors.len(), 2);
        assert!(result.risk_assessment.risk_factors[1].contains("significant increase"));
        assert_eq!(result.approval_probability, dec!(0.45));
        assert_eq!(result.status, SimulationStatus::Rejected);
        assert_eq!(result.monthly_savings, dec!(-158.29));
        assert_eq!(result.next_steps.len(), 3);
        assert_eq!(result.conditions.len(), 5);
        assert_eq!(result.current_loan_summary.remaining_term_months, Some(24));
    }

    #[test]
    fn test_auto_without_score_or_income() {
        let request = SimulationRequest::new(
            "CUST-AUTO",
            LoanType::Auto,
            dec!(18000.00),
            dec!(650.00),
            dec!(20000.00),
            36,
        );
        let result = SimulationEngine::default().calculate(&request).unwrap();
        assert_eq!(result.new_interest_rate, dec!(5.00));
        assert_eq!(result.new_monthly_payment, dec!(599.42));
        assert_eq!(result.risk_assessment.debt_to_income_ratio, Decimal::ZERO);
        assert_eq!(result.approval_probability, dec!(0.85));
        assert_eq!(result.status, SimulationStatus::Calculated);
    }

    #[test]
    fn test_fair_credit_is_pending() {
        let request = SimulationRequest::new(
            "CUST-FAIR",
            LoanType::Auto,
            dec!(22000.00),
            dec!(700.00),
            dec!(25000.00),
            48,
        )
        .with_credit_score(680);
        let result = SimulationEngine::default().calculate(&request).unwrap();
        assert_eq!(result.new_interest_rate, dec!(5.75));
        assert_eq!(result.new_monthly_payment, dec!(584.26));
        assert_eq!(result.risk_assessment.risk_level, RiskLevel::Medium);
        assert_eq!(result.approval_probability, dec!(0.70));
        assert_eq!(result.status, SimulationStatus::Pending);
        assert_eq!(result.next_steps.len(), 3);
        assert_eq!(result.conditions.len(), 3);
    }

    #[test]
    fn test_out_of_range_config_fails_without_panicking() {
        let request = SimulationRequest::new(
            "CUST-BIG",
            LoanType::Business,
            dec!(5000000.00),
            dec!(40000.00),
            dec!(5000000.00),
            360,
        );

        let steep = EngineConfig {
            base_rate: dec!(200),
            ..EngineConfig::default()
        };
        assert!(SimulationEngine::new(steep.clone()).is_err());
        let engine = SimulationEngine { config: steep };
        assert!(matches!(
            engine.calculate(&request),
            Err(EngineError::ContractViolation { .. })
        ));

        let distant = EngineConfig {
            offer_validity_days: 100_000_000,
            ..EngineConfig::default()
        };
        assert!(SimulationEngine::new(distant.clone()).is_err());
        let engine = SimulationEngine { config: distant };
        assert!(matches!(
            engine.calculate_at(&prime_mortgage(), created_at()),
            Err(EngineError::ContractViolation { .. })
        ));
    }

    #[test]
    fn test_fee_payback_break_even() {
        let config = EngineConfig::default().with_break_even(BreakEvenMethod::FeePayback);
        let engine = SimulationEngine::new(config).unwrap();

        let saving = engine.calculate(&prime_mortgage()).unwrap();
        assert_eq!(saving.comparison_metrics.break_even_months, Some(10));

        let costing = engine.calculate(&subprime_personal()).unwrap();
        assert_eq!(costing.comparison_metrics.break_even_months, None);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig::default().with_max_debt_to_income(Decimal::ZERO);
        assert!(matches!(
            SimulationEngine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_contract_violations_are_errors() {
        let engine = SimulationEngine::default();

        let mut zero_term = prime_mortgage();
        zero_term.desired_term_months = 0;
        assert!(matches!(
            engine.calculate(&zero_term),
            Err(EngineError::ContractViolation { .. })
        ));

        let mut negative = prime_mortgage();
        negative.desired_loan_amount = dec!(-5000.00);
        assert!(engine.calculate(&negative).is_err());

        let negative_income = prime_mortgage().with_monthly_income(dec!(-1.00));
        assert!(engine.calculate(&negative_income).is_err());
    }

    #[test]
    fn test_repeat_calls_differ_only_in_identity() {
        let engine = SimulationEngine::default();
        let first = engine.calculate_at(&prime_mortgage(), created_at()).unwrap();
        let second = engine.calculate_at(&prime_mortgage(), created_at()).unwrap();

        assert_ne!(first.simulation_id, second.simulation_id);
        assert_eq!(first.new_monthly_payment, second.new_monthly_payment);
        assert_eq!(first.total_interest, second.total_interest);
        assert_eq!(first.approval_probability, second.approval_probability);
        assert_eq!(first.status, second.status);
        assert_eq!(first.payment_schedule_preview, second.payment_schedule_preview);
        assert_eq!(first.next_steps, second.next_steps);
    }

    #[test]
    fn test_batch_preserves_order() {
        let engine = SimulationEngine::default();
        let mut bad = prime_mortgage();
        bad.desired_term_months = 0;
        let requests = vec![prime_mortgage(), bad, subprime_personal()];

        let batch = engine.calculate_batch_with_stats(&requests);
        assert_eq!(batch.succeeded, 2);
        assert_eq!(batch.failed, 1);
        assert_eq!(batch.results[0].as_ref().unwrap().customer_id, "CUST-12345");
        assert!(batch.results[1].is_err());
        assert_eq!(batch.results[2].as_ref().unwrap().customer_id, "CUST-777");
    }

    fn any_loan_type() -> impl Strategy<Value = LoanType> {
        proptest::sample::select(LoanType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_valid_requests_are_well_formed(
            loan_type in any_loan_type(),
            current_cents in 100_000i64..1_000_000_000,
            payment_cents in 10_000i64..100_000_000,
            desired_cents in 100_000i64..1_000_000_000,
            term in 12u32..=360,
            income_cents in proptest::option::of(0i64..100_000_000),
            score in proptest::option::of(300u16..=850),
        ) {
            let mut request = SimulationRequest::new(
                "CUST-PROP",
                loan_type,
                Decimal::new(current_cents, 2),
                Decimal::new(payment_cents, 2),
                Decimal::new(desired_cents, 2),
                term,
            );
            request.monthly_income = income_cents.map(|c| Decimal::new(c, 2));
            request.credit_score = score;

            let result = SimulationEngine::default().calculate(&request).unwrap();
            prop_assert!(result.new_interest_rate >= dec!(2.00));
            prop_assert!(result.new_monthly_payment > Decimal::ZERO);
            prop_assert!(result.approval_probability >= Decimal::ZERO);
            prop_assert!(result.approval_probability <= Decimal::ONE);
            prop_assert_eq!(result.payment_schedule_preview.len(), 3);
            prop_assert_eq!(result.new_monthly_payment.scale(), 2);
            prop_assert_eq!(result.total_savings.scale(), 2);
            prop_assert_eq!(result.risk_assessment.debt_to_income_ratio.scale(), 4);
            if score.is_some_and(|s| s < 650) {
                prop_assert_eq!(result.risk_assessment.risk_level, RiskLevel::High);
            }
        }
    }
}
