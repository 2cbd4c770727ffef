//! Application-wide configuration.
//!
//! Configuration is layered with `figment`: built-in defaults, then
//! `config.toml`, then `config.yaml`, then `HAPTIC_`-prefixed environment
//! variables, then a few raw environment variables kept for deployment
//! compatibility.

use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Serde helper for Duration serialization/deserialization as seconds
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_server_host() -> String { "0.0.0.0".to_string() }
fn default_server_port() -> u16 { 5000 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logs() -> bool { true }
fn default_max_status_keys() -> usize { 10 }
fn default_request_timeout() -> Duration { Duration::from_secs(30) }

/// Application configuration loaded from multiple sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server host
    #[serde(default = "default_server_host")]
    pub server_host: String,

    /// HTTP server port
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of compact text
    #[serde(default = "default_json_logs")]
    pub json_logs: bool,

    /// Maximum number of keys listed by the cache status endpoint
    #[serde(default = "default_max_status_keys")]
    pub max_status_keys: usize,

    /// Upper bound on the time spent handling one HTTP request
    #[serde(with = "duration_secs", default = "default_request_timeout")]
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: default_server_host(),
            server_port: default_server_port(),
            log_level: default_log_level(),
            json_logs: default_json_logs(),
            max_status_keys: default_max_status_keys(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. config.yaml (if exists)
    /// 3. config.toml (if exists)
    /// 4. Built-in defaults (lowest priority)
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    /// The layered provider stack used by [`Config::load`].
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Yaml::file("config.yaml"))
            .merge(Env::prefixed("HAPTIC_"))
            .merge(Env::raw().only(&["SERVER_HOST", "SERVER_PORT", "LOG_LEVEL"]))
    }

    /// Extract and validate configuration from a figment.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment
            .extract()
            .map_err(|e| AppError::Configuration(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server_host.trim().is_empty() {
            return Err(AppError::Configuration(
                "SERVER_HOST cannot be empty".to_string(),
            ));
        }

        if self.server_port == 0 {
            return Err(AppError::Configuration(
                "SERVER_PORT must be between 1 and 65535".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(AppError::Configuration(format!(
                "LOG_LEVEL must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }

        if self.request_timeout.is_zero() || self.request_timeout.as_secs() > 300 {
            return Err(AppError::Configuration(
                "REQUEST_TIMEOUT must be between 1 and 300 seconds".to_string(),
            ));
        }

        Ok(())
    }

    /// Export configuration to TOML format
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::Configuration(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Export configuration to YAML format
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AppError::Configuration(format!("Failed to serialize to YAML: {}", e)))
    }
}
