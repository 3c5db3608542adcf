//! Schema domain module.
//!
//! Declares the GraphQL schema served by the catalog: the record object
//! types (derived on the catalog models) and the root [`QueryRoot`].
//!
//! The resulting SDL is:
//!
//! ```graphql
//! type Query {
//!   artists: [Artist!]!
//!   albums(id: String!): Album
//!   songs(album: String!): [Song!]!
//! }
//! ```
//!
//! Argument presence and types are checked by the engine during validation,
//! before any resolver runs.

mod query;

use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};
use tracing::info;

use crate::core::config::QueryLimitsConfig;
use crate::domains::catalog::Catalog;

pub use query::QueryRoot;

/// The executable catalog schema.
pub type CatalogSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema over a shared catalog.
pub fn build_schema(catalog: Arc<Catalog>, limits: &QueryLimitsConfig) -> CatalogSchema {
    let mut builder = Schema::build(QueryRoot, EmptyMutation, EmptySubscription).data(catalog);

    if let Some(depth) = limits.max_depth {
        info!("Query depth limit: {}", depth);
        builder = builder.limit_depth(depth);
    }
    if let Some(complexity) = limits.max_complexity {
        info!("Query complexity limit: {}", complexity);
        builder = builder.limit_complexity(complexity);
    }

    builder.finish()
}
