//! Transport layer for the catalog server.
//!
//! This module provides different transport implementations:
//! - **HTTP**: GraphQL over GET query strings and POST bodies (default) - feature: `http`
//! - **STDIO**: One JSON request per stdin line, one response per stdout line - feature: `stdio`
//! - **TCP**: The same line protocol over TCP sockets - feature: `tcp`
//!
//! Each transport handles the connection lifecycle and hands query execution
//! to the [`CatalogServer`](crate::core::CatalogServer).

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(any(feature = "stdio", feature = "tcp"))]
mod lines;

#[cfg(feature = "stdio")]
pub mod stdio;

#[cfg(feature = "tcp")]
pub mod tcp;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

// Re-export configs for convenience
#[cfg(feature = "http")]
pub use config::HttpConfig;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;
