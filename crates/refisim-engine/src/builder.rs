//! Builder pattern for the simulation engine.

use rust_decimal::Decimal;

use crate::config::{BreakEvenMethod, EngineConfig};
use crate::engine::SimulationEngine;
use crate::error::EngineResult;

/// Builder for constructing a [`SimulationEngine`].
#[derive(Debug, Clone, Default)]
pub struct SimulationEngineBuilder {
    config: Option<EngineConfig>,
    base_rate: Option<Decimal>,
    break_even: Option<BreakEvenMethod>,
}

impl SimulationEngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the configured base rate.
    pub fn with_base_rate(mut self, rate: Decimal) -> Self {
        self.base_rate = Some(rate);
        self
    }

    /// Override the configured break-even method.
    pub fn with_break_even(mut self, method: BreakEvenMethod) -> Self {
        self.break_even = Some(method);
        self
    }

    /// Build the simulation engine, validating the final configuration.
    pub fn build(self) -> EngineResult<SimulationEngine> {
        let mut config = self.config.unwrap_or_default();
        if let Some(rate) = self.base_rate {
            config.base_rate = rate;
        }
        if let Some(method) = self.break_even {
            config.break_even = method;
        }
        SimulationEngine::new(config)
    }
}
