//! Server configuration.

use serde::{Deserialize, Serialize};

use refisim_engine::EngineConfig;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest number of requests accepted by the batch endpoint
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Simulation engine parameters
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_batch_size() -> usize {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_batch_size: default_max_batch_size(),
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, std::io::Error> {
        toml::from_str(content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refisim_engine::BreakEvenMethod;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_batch_size, 1000);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_engine_table() {
        let config = ServerConfig::from_toml(
            r#"
            port = 9090

            [engine]
            base_rate = "4.75"
            processing_fee_rate = "0.015"

            [engine.break_even]
            method = "fee_payback"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.engine.base_rate, dec!(4.75));
        assert_eq!(config.engine.processing_fee_rate, dec!(0.015));
        assert_eq!(config.engine.break_even, BreakEvenMethod::FeePayback);
    }

    #[test]
    fn test_malformed_toml_is_invalid_data() {
        let err = ServerConfig::from_toml("port = \"not a number\"").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refisim.toml");
        std::fs::write(&path, "host = \"127.0.0.1\"\n").unwrap();

        let config = ServerConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.host, "127.0.0.1");
    }
}
