//! Configuration management for the catalog server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the catalog server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Where the catalog data comes from.
    pub catalog: CatalogConfig,

    /// Resource limits handed to the query engine.
    pub limits: QueryLimitsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Catalog source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file. The built-in fixture is used when unset.
    pub data_path: Option<PathBuf>,
}

/// Query engine limits. `None` leaves the engine default in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryLimitsConfig {
    /// Maximum selection nesting depth.
    pub max_depth: Option<usize>,

    /// Maximum query complexity.
    pub max_complexity: Option<usize>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "music-catalog".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Load the logging section alone.
    ///
    /// This is read before the subscriber is installed, so it must not log.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("CATALOG_LOG_LEVEL") {
            logging.level = level;
        }
        logging
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `CATALOG_`.
    /// For example: `CATALOG_SERVER_NAME`, `CATALOG_LOG_LEVEL`.
    ///
    /// Fallbacks are reported through `tracing`, so install the subscriber
    /// first (see [`LoggingConfig::from_env`]).
    pub fn from_env() -> Self {
        let mut config = Self {
            logging: LoggingConfig::from_env(),
            ..Self::default()
        };

        if let Ok(name) = std::env::var("CATALOG_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(path) = std::env::var("CATALOG_DATA_PATH") {
            info!("Catalog file configured: {}", path);
            config.catalog.data_path = Some(PathBuf::from(path));
        }

        config.limits.max_depth = env_usize("CATALOG_MAX_DEPTH");
        config.limits.max_complexity = env_usize("CATALOG_MAX_COMPLEXITY");

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_depth == Some(0) {
            return Err(Error::config("CATALOG_MAX_DEPTH must be at least 1"));
        }
        if self.limits.max_complexity == Some(0) {
            return Err(Error::config("CATALOG_MAX_COMPLEXITY must be at least 1"));
        }
        self.transport.validate()
    }
}

/// Read an optional numeric variable, ignoring unparseable values.
fn env_usize(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a positive integer", key, raw);
            None
        }
    }
}
