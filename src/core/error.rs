//! Error types and handling for the catalog server.
//!
//! This module defines a unified error type covering startup and transport
//! failures. Per-request query failures are not errors at this level: the
//! query engine reports them inside the response body.

use thiserror::Error;

/// A specialized Result type for catalog server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the catalog server.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::domains::catalog::CatalogError),

    /// The transport failed to start or stopped unexpectedly.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
