//! Music Catalog Server Library
//!
//! This crate serves a small, read-only catalog of artists, albums and songs
//! through a GraphQL endpoint.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the query-executing server and its transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **catalog**: Record kinds, the in-memory store and its lookups
//!   - **schema**: The GraphQL schema over the catalog
//!
//! # Example
//!
//! ```rust,no_run
//! use music_catalog_server::core::{CatalogServer, Config, QueryRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = CatalogServer::new(Config::from_env())?;
//!     let response = server.execute(QueryRequest::new("{ artists { name } }")).await;
//!     println!("{}", serde_json::to_string(&response)?);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{CatalogServer, Config, Error, QueryRequest, Result};
