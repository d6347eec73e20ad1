//! Configuration loading and typed config structures for the coordinator.
//!
//! The canonical configuration lives in `aurora-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, and provides a loader that reads and validates
//! the file. Every field has a default matching the reference
//! deployment, so an empty (or absent) file yields a playable game.

use std::path::Path;

use serde::Deserialize;

use crate::registry::CodeRegistry;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level coordinator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CoordinatorConfig {
    /// HTTP/`WebSocket` server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Snapshot persistence settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Code registry values for this deployment.
    #[serde(default)]
    pub registry: RegistryConfig,
}

impl CoordinatorConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `AURORA_PORT` overrides `server.port`
    /// - `AURORA_SNAPSHOT_PATH` overrides `persistence.snapshot_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as YAML null, which is not a
        // valid mapping; treat it as "all defaults".
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override settings with environment variables when set.
    ///
    /// This lets a deployment change the port or snapshot location
    /// without modifying the YAML config file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("AURORA_PORT")
            && let Ok(port) = val.parse::<u16>()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("AURORA_SNAPSHOT_PATH") {
            self.persistence.snapshot_path = val;
        }
    }
}

/// HTTP/`WebSocket` server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Snapshot persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistenceConfig {
    /// Path of the JSON snapshot file.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Seconds between periodic autosaves.
    #[serde(default = "default_autosave_interval_secs")]
    pub autosave_interval_secs: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            autosave_interval_secs: default_autosave_interval_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
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

/// Code registry values for one deployment.
///
/// Defaults are the reference game's codes. Changing these means
/// reprinting the physical QR sheets, so treat them as fixed once a
/// game has been built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    /// Recovery code values, in display order.
    #[serde(default = "default_recovery_codes")]
    pub recovery_codes: Vec<String>,

    /// QR code values, in display order.
    #[serde(default = "default_qr_codes")]
    pub qr_codes: Vec<String>,

    /// The final hidden code revealed on QR-set completion.
    #[serde(default = "default_final_hidden_code")]
    pub final_hidden_code: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            recovery_codes: default_recovery_codes(),
            qr_codes: default_qr_codes(),
            final_hidden_code: default_final_hidden_code(),
        }
    }
}

impl From<RegistryConfig> for CodeRegistry {
    fn from(config: RegistryConfig) -> Self {
        Self::new(
            config.recovery_codes,
            config.qr_codes,
            config.final_hidden_code,
        )
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3000
}

fn default_snapshot_path() -> String {
    "gameState.json".to_owned()
}

const fn default_autosave_interval_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_recovery_codes() -> Vec<String> {
    CodeRegistry::default()
        .recovery_codes()
        .to_vec()
}

fn default_qr_codes() -> Vec<String> {
    CodeRegistry::default().qr_codes().to_vec()
}

fn default_final_hidden_code() -> String {
    CodeRegistry::default().final_hidden_code().to_owned()
}
