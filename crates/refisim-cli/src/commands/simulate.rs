//! Simulate command implementation.
//!
//! Runs a single refinancing simulation from command-line arguments.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use refisim_core::{LoanType, SimulationRequest, SimulationResult};

use crate::cli::OutputFormat;
use crate::commands::{build_engine, validate_request};
use crate::output::{
    format_money, format_percent, format_rate, print_header, print_output, print_single, KeyValue,
};

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Customer identifier
    #[arg(long)]
    pub customer_id: String,

    /// Loan type (personal, mortgage, auto, business, student)
    #[arg(long)]
    pub loan_type: LoanType,

    /// Outstanding balance of the current loan
    #[arg(long)]
    pub current_amount: Decimal,

    /// Monthly payment on the current loan
    #[arg(long)]
    pub current_payment: Decimal,

    /// Amount of the new loan
    #[arg(long)]
    pub desired_amount: Decimal,

    /// Term of the new loan in months (12-360)
    #[arg(long)]
    pub term: u32,

    /// Gross monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Credit score (300-850)
    #[arg(long)]
    pub credit_score: Option<u16>,
}

impl SimulateArgs {
    fn to_request(&self) -> SimulationRequest {
        let mut request = SimulationRequest::new(
            self.customer_id.clone(),
            self.loan_type,
            self.current_amount,
            self.current_payment,
            self.desired_amount,
            self.term,
        );
        request.monthly_income = self.income;
        request.credit_score = self.credit_score;
        request
    }
}

/// One row of the payment preview.
#[derive(Debug, Serialize, Tabled)]
struct PreviewRow {
    #[tabled(rename = "#")]
    payment: u32,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Execute the simulate command.
pub fn execute(
    args: SimulateArgs,
    format: OutputFormat,
    config: Option<&std::path::Path>,
) -> Result<()> {
    let request = args.to_request();
    validate_request(&request)?;

    let engine = build_engine(config)?;
    let result = engine.calculate(&request)?;

    match format {
        OutputFormat::Json => print_single(&result)?,
        OutputFormat::Minimal => println!("{}", format_money(result.new_monthly_payment)),
        OutputFormat::Csv => print_output(&summary_rows(&result), format)?,
        OutputFormat::Table => print_report(&result)?,
    }

    Ok(())
}

fn summary_rows(result: &SimulationResult) -> Vec<KeyValue> {
    let break_even = result
        .comparison_metrics
        .break_even_months
        .map_or_else(|| "n/a".to_string(), |m| format!("{} months", m));

    vec![
        KeyValue::new("Simulation", result.simulation_id.to_string()),
        KeyValue::new("Customer", result.customer_id.clone()),
        KeyValue::new("Loan Type", result.loan_type.to_string()),
        KeyValue::new("Status", result.status.to_string()),
        KeyValue::new("Loan Amount", format_money(result.new_loan_amount)),
        KeyValue::new("Interest Rate", format_rate(result.new_interest_rate)),
        KeyValue::new("Term", format!("{} months", result.term_months)),
        KeyValue::new("Monthly Payment", format_money(result.new_monthly_payment)),
        KeyValue::new("Total Interest", format_money(result.total_interest)),
        KeyValue::new("Total Amount", format_money(result.total_amount)),
        KeyValue::new("Monthly Savings", format_money(result.monthly_savings)),
        KeyValue::new("Total Savings", format_money(result.total_savings)),
        KeyValue::new("Processing Fee", format_money(result.processing_fee)),
        KeyValue::new("Break-even", break_even),
        KeyValue::new("Approval Probability", format_percent(result.approval_probability)),
        KeyValue::new("Risk Level", result.risk_assessment.risk_level.to_string()),
        KeyValue::new(
            "Debt-to-Income",
            format_percent(result.risk_assessment.debt_to_income_ratio),
        ),
        KeyValue::new("Expires", result.expires_at.format("%Y-%m-%d").to_string()),
    ]
}

fn print_report(result: &SimulationResult) -> Result<()> {
    print_header("Refinancing Offer");
    print_output(&summary_rows(result), OutputFormat::Table)?;

    print_header("Payment Preview");
    let preview: Vec<PreviewRow> = result
        .payment_schedule_preview
        .iter()
        .map(|p| PreviewRow {
            payment: p.payment_number,
            principal: format_money(p.principal_amount),
            interest: format_money(p.interest_amount),
            balance: format_money(p.remaining_balance),
        })
        .collect();
    print_output(&preview, OutputFormat::Table)?;

    print_list("Risk Factors", &result.risk_assessment.risk_factors);
    print_list("Next Steps", &result.next_steps);
    print_list("Conditions", &result.conditions);
    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    print_header(title);
    for item in items {
        println!("  - {}", item);
    }
}
