//! Tally API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, then command line flags are layered on top.
//!
//! | Variable             | Default            |
//! |----------------------|--------------------|
//! | `TALLY_HOST`         | `0.0.0.0`          |
//! | `TALLY_PORT`         | `8080`             |
//! | `TALLY_API_KEYS`     | `key1,key2,key3`   |
//! | `TALLY_AUTH_ENABLED` | `true`             |

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Keys accepted when `TALLY_API_KEYS` is unset.
pub const DEFAULT_API_KEYS: [&str; 3] = ["key1", "key2", "key3"];

/// Tally API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// Shared API keys (raw form)
    pub api_keys: Vec<String>,

    /// Validate the `Authorization` header
    pub auth_enabled: bool,

    /// Log scoring details
    pub debug: bool,

    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup` (an environment stand-in).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            host: lookup("TALLY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("TALLY_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TALLY_PORT".to_string()))?,

            api_keys: match lookup("TALLY_API_KEYS") {
                Some(keys) => keys
                    .split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => DEFAULT_API_KEYS.iter().map(|key| key.to_string()).collect(),
            },

            auth_enabled: match lookup("TALLY_AUTH_ENABLED") {
                Some(value) => parse_bool(&value)
                    .ok_or_else(|| ConfigError::InvalidValue("TALLY_AUTH_ENABLED".to_string()))?,
                None => true,
            },

            debug: false,
            log_file: None,
        };

        Ok(config)
    }

    /// Applies command line flags, then checks the result.
    ///
    /// Flags win over the environment, so `--noauth` makes an empty
    /// `TALLY_API_KEYS` acceptable.
    pub fn with_cli(mut self, cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(port) = cli.port {
            self.port = port;
        }
        if cli.noauth {
            self.auth_enabled = false;
        }
        self.debug = cli.debug;
        self.log_file = cli.log.then(|| cli.logfile.clone());

        self.validate()?;
        Ok(self)
    }

    /// Auth needs at least one key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth_enabled && self.api_keys.is_empty() {
            return Err(ConfigError::MissingRequired("TALLY_API_KEYS".to_string()));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
