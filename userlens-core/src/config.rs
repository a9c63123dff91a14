//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/userlens/config.toml`, honouring
//! `$XDG_CONFIG_HOME` when it is set.
//!
//! ```toml
//! [tracker]
//! write_code = "your-write-code"
//! requests_timeout = 5
//!
//! [logging]
//! level = "warn"
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Base URL of the Userlens ingestion service
pub const INGESTOR_URL: &str = "https://events.userlens.io";

/// Client identifier sent as `source` on track and group events
pub const SDK_SOURCE: &str = "userlens-sdk-rs";

/// Default per-request timeout in seconds
pub const DEFAULT_REQUESTS_TIMEOUT: u64 = 5;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Event tracker configuration
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Event tracker configuration
#[derive(Deserialize, Clone)]
pub struct TrackerConfig {
    /// Write code identifying the destination workspace
    pub write_code: Option<String>,

    /// HTTP request timeout in seconds, applied to each request separately
    #[serde(default = "default_requests_timeout")]
    pub requests_timeout: u64,

    /// Base URL of the ingestion service
    #[serde(default = "default_ingestor_url")]
    pub ingestor_url: String,

    /// Client identifier sent with track and group events
    #[serde(default = "default_source")]
    pub source: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            write_code: None,
            requests_timeout: default_requests_timeout(),
            ingestor_url: default_ingestor_url(),
            source: default_source(),
        }
    }
}

// Hand-written so the write code never ends up in logs.
impl std::fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerConfig")
            .field(
                "write_code",
                &self.write_code.as_ref().map(|_| "<redacted>"),
            )
            .field("requests_timeout", &self.requests_timeout)
            .field("ingestor_url", &self.ingestor_url)
            .field("source", &self.source)
            .finish()
    }
}

impl TrackerConfig {
    /// Configuration for `write_code` with every other field at its default
    pub fn new(write_code: impl Into<String>) -> Self {
        Self {
            write_code: Some(write_code.into()),
            ..Default::default()
        }
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        match self.write_code.as_deref() {
            Some(code) if !code.is_empty() => {}
            _ => {
                return Err(Error::Config(
                    "write_code is required and must be a string".to_string(),
                ))
            }
        }
        if self.requests_timeout == 0 {
            return Err(Error::Config(
                "requests_timeout must be a positive integer".to_string(),
            ));
        }
        if self.ingestor_url.trim_end_matches('/').is_empty() {
            return Err(Error::Config("ingestor_url must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_requests_timeout() -> u64 {
    DEFAULT_REQUESTS_TIMEOUT
}

fn default_ingestor_url() -> String {
    INGESTOR_URL.to_string()
}

fn default_source() -> String {
    SDK_SOURCE.to_string()
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/userlens/config.toml` (~/.config/userlens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("userlens").join("config.toml")
    }
}
