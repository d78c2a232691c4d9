//! Configuration loading.
//!
//! The agent reads a single YAML document at startup. The resulting
//! [`Config`] is never mutated or reloaded afterwards.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Well-known configuration file, resolved relative to the working directory.
pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Agent configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Vault API URL, e.g., "http://127.0.0.1:8200".
    pub base_url: String,
    /// Unseal key shares, submitted in this order.
    pub sealed_keys: Vec<String>,
    /// Seconds between two status checks.
    pub unseal_interval: u64,
}

impl Config {
    /// Steady-state delay between two status checks.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.unseal_interval)
    }

    fn validate(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid("baseUrl must not be empty".to_string()));
        }
        self.base_url = trimmed.to_string();

        if self.unseal_interval == 0 {
            return Err(ConfigError::Invalid(
                "unsealInterval must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Parses a configuration document.
pub fn parse_config(document: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(document)?;
    config.validate()
}

/// Reads and parses the configuration file at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let config = parse_config(&document)?;
    debug!(
        "Loaded configuration from {}: {} key share(s), interval {}s",
        path.display(),
        config.sealed_keys.len(),
        config.unseal_interval
    );
    Ok(config)
}
