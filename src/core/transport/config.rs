//! Transport configuration types.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
#[cfg(feature = "http")]
use crate::core::error::Error;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// HTTP transport serving GraphQL over GET and POST (default).
    #[cfg(feature = "http")]
    Http(HttpConfig),

    /// Line-delimited JSON requests on stdin, responses on stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// Line-delimited JSON requests over TCP connections.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_http_host")]
    pub host: String,

    /// Path of the GraphQL endpoint.
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

/// TCP transport configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_tcp_host")]
    pub host: String,
}

#[cfg(feature = "http")]
const DEFAULT_HTTP_PORT: u16 = 8088;

/// Routes the HTTP transport serves besides the GraphQL endpoint.
#[cfg(feature = "http")]
const RESERVED_HTTP_PATHS: &[&str] = &["", "/health"];

#[cfg(feature = "tcp")]
const DEFAULT_TCP_PORT: u16 = 4000;

#[cfg(feature = "http")]
fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

#[cfg(feature = "http")]
fn default_graphql_path() -> String {
    "/graphql".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

#[cfg(feature = "tcp")]
fn default_tcp_host() -> String {
    "127.0.0.1".to_string()
}

/// Parse a port variable, falling back to `default` when unset or invalid.
#[cfg(any(feature = "http", feature = "tcp"))]
fn env_port(key: &str, default: u16) -> u16 {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring {}={:?}: not a valid port", key, raw);
            default
        }),
        Err(_) => default,
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "http"), not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(TcpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: http, stdio, or tcp");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            host: default_http_host(),
            graphql_path: default_graphql_path(),
            enable_cors: default_cors(),
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_TCP_PORT,
            host: default_tcp_host(),
        }
    }
}

impl TransportConfig {
    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create a TCP transport config.
    #[cfg(feature = "tcp")]
    pub fn tcp(port: u16, host: impl Into<String>) -> Self {
        Self::Tcp(TcpConfig {
            port,
            host: host.into(),
        })
    }

    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let transport = std::env::var("CATALOG_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "tcp")]
            "tcp" => {
                let port = env_port("CATALOG_TCP_PORT", DEFAULT_TCP_PORT);
                let host = std::env::var("CATALOG_TCP_HOST").unwrap_or_else(|_| default_tcp_host());
                Self::Tcp(TcpConfig { port, host })
            }
            #[cfg(feature = "http")]
            "http" | "" => {
                let port = env_port("CATALOG_HTTP_PORT", DEFAULT_HTTP_PORT);
                let host =
                    std::env::var("CATALOG_HTTP_HOST").unwrap_or_else(|_| default_http_host());
                let graphql_path =
                    std::env::var("CATALOG_HTTP_PATH").unwrap_or_else(|_| default_graphql_path());
                let enable_cors = std::env::var("CATALOG_HTTP_CORS")
                    .map(|v| v.to_lowercase() != "false" && v != "0")
                    .unwrap_or(true);
                Self::Http(HttpConfig {
                    port,
                    host,
                    graphql_path,
                    enable_cors,
                })
            }
            other => {
                if !other.is_empty() {
                    tracing::warn!("Unknown or disabled transport {:?}, using default", other);
                }
                Self::default()
            }
        }
    }

    /// Check settings that would make the transport unusable.
    pub fn validate(&self) -> Result<()> {
        match self {
            #[cfg(feature = "http")]
            Self::Http(cfg) => {
                let path = cfg.graphql_path.as_str();
                if !path.starts_with('/') || path.len() < 2 {
                    return Err(Error::config(format!(
                        "GraphQL path must start with '/' and name a route, got {:?}",
                        path
                    )));
                }
                if path.contains(['{', '}', '*']) {
                    return Err(Error::config(format!(
                        "GraphQL path must be a literal route, got {:?}",
                        path
                    )));
                }
                if RESERVED_HTTP_PATHS.contains(&path.trim_end_matches('/')) {
                    return Err(Error::config(format!(
                        "GraphQL path {:?} is already served by another route",
                        path
                    )));
                }
                Ok(())
            }
            #[cfg(feature = "stdio")]
            Self::Stdio => Ok(()),
            #[cfg(feature = "tcp")]
            Self::Tcp(_) => Ok(()),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.graphql_path),
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (line-delimited JSON)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
        }
    }
}
