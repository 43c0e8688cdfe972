//! CLI command implementations.

pub mod batch;
pub mod config;
pub mod simulate;

pub use batch::BatchArgs;
pub use config::ConfigArgs;
pub use simulate::SimulateArgs;

use std::path::Path;

use serde::Deserialize;

use refisim_core::validation::Validate;
use refisim_core::SimulationRequest;
use refisim_engine::{EngineConfig, SimulationEngine};

use crate::error::{CliError, CliResult};

/// Configuration file layout shared with the server; only `[engine]` is read.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineConfig,
}

/// Loads the engine configuration, falling back to defaults without a file.
pub fn load_engine_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let content = std::fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&content)
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
    Ok(file.engine)
}

/// Builds a validated engine from an optional configuration file.
pub fn build_engine(path: Option<&Path>) -> CliResult<SimulationEngine> {
    let config = load_engine_config(path)?;
    Ok(SimulationEngine::new(config)?)
}

/// Collects every field error of a request into one message.
pub fn validate_request(request: &SimulationRequest) -> CliResult<()> {
    let errors = request.validate();
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(CliError::InvalidRequest(message))
}
