//! Domains module containing business logic organized by bounded contexts.
//!
//! - **catalog**: the music records and the lookups over them
//! - **schema**: the GraphQL types and root query built on the catalog

pub mod catalog;
pub mod schema;
