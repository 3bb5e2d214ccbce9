//! Client configuration.
//!
//! `ClientConfig::default()` targets the public game service. `from_env()`
//! overlays environment variables on top of the defaults:
//!
//! | variable                        | field             |
//! |---------------------------------|-------------------|
//! | `MUGLOAR_BASE_URL`              | `base_url`        |
//! | `MUGLOAR_TIMEOUT_SECS`          | `timeout`         |
//! | `MUGLOAR_CONNECT_TIMEOUT_SECS`  | `connect_timeout` |
//!
//! Deserialized configs read the same way: timeouts are whole seconds and
//! a trailing `/` on `base_url` is dropped.

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://www.dragonsofmugloar.com/api/game";

const DEFAULT_USER_AGENT: &str = concat!("mugloar-client/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(deserialize_with = "trimmed_url")]
    pub base_url: String,
    /// Whole-request timeout enforced by the transport.
    #[serde(deserialize_with = "whole_seconds")]
    pub timeout: Duration,
    #[serde(deserialize_with = "whole_seconds")]
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = trim_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup("MUGLOAR_BASE_URL") {
            config = config.with_base_url(&url);
        }
        if let Some(secs) = seconds(&lookup, "MUGLOAR_TIMEOUT_SECS")? {
            config.timeout = secs;
        }
        if let Some(secs) = seconds(&lookup, "MUGLOAR_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = secs;
        }
        Ok(config)
    }
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn trimmed_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|url| trim_url(&url))
}

fn whole_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_secs)
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(|s| Some(Duration::from_secs(s)))
            .map_err(|_| ConfigError::InvalidVar { name, value }),
    }
}
