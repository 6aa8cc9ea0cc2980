//! Configuration module for the sidecar client

mod api;

pub use api::ApiConfig;

use crate::error::ConfigurationError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default configuration file name
const DEFAULT_CONFIG_FILE: &str = "sidecar-client.toml";

/// Environment variable prefix, nested fields split on `__`
const ENV_PREFIX: &str = "SIDECAR_";

/// Main configuration structure for the sidecar client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API connection configuration
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Layer priority (highest to lowest): `SIDECAR_*` environment variables,
    /// the configuration file (explicit path or `sidecar-client.toml`),
    /// compiled defaults. An explicitly requested file must exist.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let figment = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigurationError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Figment::from(Serialized::defaults(Config::default()))
                    .merge(Toml::file(path))
                    .merge(Env::prefixed(ENV_PREFIX).split("__"))
            }
            None => Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(DEFAULT_CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        };

        figment.extract().map_err(|e| ConfigurationError::Parse {
            details: e.to_string(),
        })
    }

    /// Generate example configuration file
    pub fn generate_example() -> Result<String, ConfigurationError> {
        let config = Self::default();
        toml::to_string_pretty(&config).map_err(|e| ConfigurationError::Parse {
            details: format!("Failed to serialize config: {e}"),
        })
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout)
    }

    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.api.connect_timeout)
    }
}
