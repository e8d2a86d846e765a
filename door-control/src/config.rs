//! Configuration management for door-control.
//!
//! Configuration is resolved in layers: built-in defaults, then an optional
//! TOML file, then environment variables, then command-line flags (see
//! [`crate::cli`]). Later layers win.

use serde::Deserialize;
use std::path::Path;

use crate::api_client::parse_endpoint_url;
use crate::error::{Error, Result};

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT_URL: &str = "https://data-dancer.com/api/door";

/// Environment variable overriding the endpoint URL.
pub const ENV_URL: &str = "DOOR_CONTROL_URL";

/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "DOOR_CONTROL_TIMEOUT_SECS";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Door endpoint configuration
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

/// Door endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// Absolute http(s) URL accepting `POST` command bodies
    #[serde(default = "default_url")]
    pub url: String,

    /// Whole-request timeout. Unset means the transport default, which
    /// never gives up on a hung request.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `DOOR_CONTROL_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL) {
            self.endpoint.url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("{ENV_TIMEOUT_SECS}='{raw}' is not a number: {e}"))
            })?;
            self.endpoint.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Check that the resolved configuration is usable.
    pub fn validate(&self) -> Result<()> {
        parse_endpoint_url(&self.endpoint.url)?;
        if self.endpoint.timeout_secs == Some(0) {
            return Err(Error::Config("timeout must be at least one second".into()));
        }
        Ok(())
    }
}
