//! Refisim CLI - Command-line interface for refinancing simulations.
//!
//! # Usage
//!
//! ```bash
//! # Simulate one refinancing offer
//! refisim simulate --customer-id CUST-1 --loan-type mortgage \
//!     --current-amount 180000 --current-payment 1400 \
//!     --desired-amount 200000 --term 240 --income 6000 --credit-score 760
//!
//! # Simulate every row of a CSV file
//! refisim batch requests.csv --format json
//!
//! # Show the effective engine configuration
//! refisim --config config/refisim.toml config show
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up output format
    let format = cli.format;
    let config_path = cli.config.as_deref();

    // Execute command
    match cli.command {
        Commands::Simulate(args) => commands::simulate::execute(args, format, config_path)?,
        Commands::Batch(args) => commands::batch::execute(args, format, config_path, cli.quiet)?,
        Commands::Config(args) => commands::config::execute(args, format, config_path)?,
    }

    Ok(())
}
