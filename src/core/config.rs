//! Configuration management for the installer daemon.
//!
//! This module provides a centralized configuration structure populated from
//! defaults, a `.env` file and `FBI_*` environment variables. Command-line
//! flags are applied on top by the binary.

use super::transport::HttpConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Default TCP port devices listen on for notifications.
pub const DEFAULT_NOTIFY_PORT: u16 = 5000;

/// Default bound on establishing a notification connection.
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Main configuration structure for the daemon.
///
/// Built once at startup and handed to [`InstallerServer`](super::InstallerServer);
/// nothing mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Data directory configuration.
    pub storage: StorageConfig,

    /// Device notification configuration.
    pub notify: NotifyConfig,

    /// HTTP listener configuration.
    pub http: HttpConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported in logs and `/health`.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory packages are stored in. Required to serve.
    pub data_dir: Option<PathBuf>,
}

/// Configuration for device notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Port the device listens on.
    pub port: u16,

    /// Upper bound on connecting to the device.
    pub connect_timeout: Duration,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_NOTIFY_PORT,
            connect_timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            storage: StorageConfig::default(),
            notify: NotifyConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl StorageConfig {
    /// Create the data directory if needed and return its canonical path.
    pub fn prepare_data_dir(&self) -> super::Result<PathBuf> {
        let Some(ref dir) = self.data_dir else {
            return Err(super::Error::config(
                "data directory is not set (use --data-dir or FBI_DATA_DIR)",
            ));
        };

        prepare_dir(dir)
    }
}

fn prepare_dir(dir: &Path) -> super::Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        info!("Created data directory {}", dir.display());
    }

    if !dir.is_dir() {
        return Err(super::Error::config(format!(
            "data directory {} is not a directory",
            dir.display()
        )));
    }

    Ok(dir.canonicalize()?)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `FBI_`.
    /// For example: `FBI_DATA_DIR`, `FBI_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(level) = std::env::var("FBI_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(data_dir) = std::env::var("FBI_DATA_DIR") {
            config.storage.data_dir = Some(PathBuf::from(data_dir));
        }

        if let Ok(port) = std::env::var("FBI_NOTIFY_PORT") {
            match port.parse() {
                Ok(port) => config.notify.port = port,
                Err(_) => warn!("Ignoring invalid FBI_NOTIFY_PORT: {}", port),
            }
        }

        if let Ok(secs) = std::env::var("FBI_NOTIFY_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => config.notify.connect_timeout = Duration::from_secs(secs),
                Err(_) => warn!("Ignoring invalid FBI_NOTIFY_TIMEOUT_SECS: {}", secs),
            }
        }

        // Load HTTP configuration from environment
        config.http = HttpConfig::from_env();

        config
    }
}
