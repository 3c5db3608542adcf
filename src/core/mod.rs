//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the catalog
//! server, including error handling, configuration, the server that executes
//! queries, and the transport layer.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{Error, Result};
pub use server::{CatalogServer, QueryRequest};
pub use transport::{TransportConfig, TransportService};
