//! Config command implementation.
//!
//! Shows and checks the engine configuration the other commands use.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use refisim_core::validation::Validate;
use refisim_engine::pricing::LARGE_LOAN_THRESHOLD;
use refisim_engine::{BreakEvenMethod, EngineConfig};

use crate::cli::OutputFormat;
use crate::commands::load_engine_config;
use crate::error::CliError;
use crate::output::{
    format_money, format_percent, format_rate, print_error, print_output, print_single,
    print_success, KeyValue,
};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Defaults to `show`
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective engine configuration
    Show {
        /// Print as a TOML `[engine]` section
        #[arg(long)]
        toml: bool,
    },

    /// Check the configuration against its bounds
    Check,
}

/// Wraps the engine section the way the configuration file nests it.
#[derive(Serialize)]
struct EngineSection<'a> {
    engine: &'a EngineConfig,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat, config: Option<&Path>) -> Result<()> {
    let engine_config = load_engine_config(config)?;

    match args.command.unwrap_or(ConfigCommand::Show { toml: false }) {
        ConfigCommand::Show { toml: true } => {
            let text = toml::to_string(&EngineSection {
                engine: &engine_config,
            })
            .map_err(|e| CliError::Config(e.to_string()))?;
            print!("{}", text);
        }
        ConfigCommand::Show { toml: false } => match format {
            OutputFormat::Json => print_single(&engine_config)?,
            _ => print_output(&config_rows(&engine_config), format)?,
        },
        ConfigCommand::Check => {
            let errors = engine_config.validate();
            if errors.is_empty() {
                print_success("Engine configuration is valid");
            } else {
                for error in &errors {
                    print_error(&error.to_string());
                }
                return Err(CliError::Config(format!("{} setting(s) rejected", errors.len())).into());
            }
        }
    }

    Ok(())
}

fn config_rows(config: &EngineConfig) -> Vec<KeyValue> {
    let break_even = match config.break_even {
        BreakEvenMethod::Reference { months } => format!("reference ({} months)", months),
        BreakEvenMethod::FeePayback => "fee payback".to_string(),
    };

    vec![
        KeyValue::new("Base Rate", format_rate(config.base_rate)),
        KeyValue::new("Minimum Rate", format_rate(config.min_rate)),
        KeyValue::new("Max Debt-to-Income", format_percent(config.max_debt_to_income)),
        KeyValue::new(
            "Elevated Debt-to-Income",
            format_percent(config.elevated_debt_to_income),
        ),
        KeyValue::new("Processing Fee", format_percent(config.processing_fee_rate)),
        KeyValue::new("Reference Current Rate", format_rate(config.reference_current_rate)),
        KeyValue::new("Offer Validity", format!("{} days", config.offer_validity_days)),
        KeyValue::new("Break-even", break_even),
        KeyValue::new("Large Loan Threshold", format_money(LARGE_LOAN_THRESHOLD)),
    ]
}
