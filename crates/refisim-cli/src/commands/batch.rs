//! Batch command implementation.
//!
//! Reads simulation requests from a CSV file and runs them in parallel.
//! The header row uses the request field names; `income` and
//! `credit_score` may be left empty.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use refisim_core::{LoanType, SimulationRequest};

use crate::cli::OutputFormat;
use crate::commands::{build_engine, validate_request};
use crate::error::{CliError, CliResult};
use crate::output::{
    format_money, format_percent, format_rate, print_output, print_success, print_warning,
};

/// Arguments for the batch command.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// CSV file of simulation requests
    pub input: PathBuf,

    /// Stop at the first invalid row instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

/// One CSV input row.
#[derive(Debug, Deserialize)]
struct RequestRow {
    customer_id: String,
    loan_type: LoanType,
    current_loan_amount: Decimal,
    current_monthly_payment: Decimal,
    desired_loan_amount: Decimal,
    desired_term_months: u32,
    #[serde(default)]
    income: Option<Decimal>,
    #[serde(default)]
    credit_score: Option<u16>,
}

impl From<RequestRow> for SimulationRequest {
    fn from(row: RequestRow) -> Self {
        let mut request = SimulationRequest::new(
            row.customer_id,
            row.loan_type,
            row.current_loan_amount,
            row.current_monthly_payment,
            row.desired_loan_amount,
            row.desired_term_months,
        );
        request.monthly_income = row.income;
        request.credit_score = row.credit_score;
        request
    }
}

/// One summary row per simulated request.
#[derive(Debug, Serialize, Tabled)]
pub struct BatchRow {
    /// CSV line the request came from
    #[tabled(rename = "Line")]
    pub line: u64,
    /// Customer identifier
    #[tabled(rename = "Customer")]
    pub customer_id: String,
    /// Outcome status, or ERROR
    #[tabled(rename = "Status")]
    pub status: String,
    /// Offered rate
    #[tabled(rename = "Rate")]
    pub rate: String,
    /// Offered monthly payment
    #[tabled(rename = "Payment")]
    pub payment: String,
    /// Monthly savings
    #[tabled(rename = "Savings")]
    pub monthly_savings: String,
    /// Approval probability
    #[tabled(rename = "Approval")]
    pub approval: String,
    /// Risk level, or the error message
    #[tabled(rename = "Risk / Error")]
    pub detail: String,
}

impl BatchRow {
    fn error(line: u64, customer_id: String, message: String) -> Self {
        Self {
            line,
            customer_id,
            status: "ERROR".to_string(),
            rate: String::new(),
            payment: String::new(),
            monthly_savings: String::new(),
            approval: String::new(),
            detail: message,
        }
    }
}

/// Reads every row, keeping the CSV line number of each.
fn read_requests(path: &Path) -> CliResult<Vec<(u64, Result<SimulationRequest, String>)>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let request = record
            .deserialize::<RequestRow>(Some(&headers))
            .map(SimulationRequest::from)
            .map_err(|e| e.to_string());
        rows.push((line, request));
    }
    Ok(rows)
}

/// Execute the batch command.
pub fn execute(
    args: BatchArgs,
    format: OutputFormat,
    config: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let engine = build_engine(config)?;
    let rows = read_requests(&args.input)?;
    if rows.is_empty() {
        return Err(CliError::Input(format!("{} contains no requests", args.input.display())).into());
    }

    let mut output = Vec::with_capacity(rows.len());
    let mut accepted = Vec::new();
    let mut accepted_lines = Vec::new();
    for (line, row) in rows {
        let outcome = row.and_then(|request| {
            validate_request(&request)
                .map(|()| request)
                .map_err(|e| e.to_string())
        });
        match outcome {
            Ok(request) => {
                accepted_lines.push((output.len(), line));
                output.push(None);
                accepted.push(request);
            }
            Err(message) if args.strict => {
                return Err(CliError::InvalidRequest(format!("line {}: {}", line, message)).into());
            }
            Err(message) => output.push(Some(BatchRow::error(line, String::new(), message))),
        }
    }

    let batch = engine.calculate_batch_with_stats(&accepted);
    for (((slot, line), request), outcome) in accepted_lines
        .into_iter()
        .zip(&accepted)
        .zip(batch.results)
    {
        let row = match outcome {
            Ok(result) => BatchRow {
                line,
                customer_id: result.customer_id,
                status: result.status.to_string(),
                rate: format_rate(result.new_interest_rate),
                payment: format_money(result.new_monthly_payment),
                monthly_savings: format_money(result.monthly_savings),
                approval: format_percent(result.approval_probability),
                detail: result.risk_assessment.risk_level.to_string(),
            },
            Err(e) => BatchRow::error(line, request.customer_id.clone(), e.to_string()),
        };
        output[slot] = Some(row);
    }

    let output: Vec<BatchRow> = output.into_iter().flatten().collect();
    let failed = output.iter().filter(|row| row.status == "ERROR").count();
    print_output(&output, format)?;

    if !quiet && format == OutputFormat::Table {
        print_success(&format!(
            "{} simulated in {} ms",
            output.len() - failed,
            batch.elapsed_ms
        ));
        if failed > 0 {
            print_warning(&format!("{} row(s) failed", failed));
        }
    }

    Ok(())
}
