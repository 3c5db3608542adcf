//! Catalog server implementation.
//!
//! [`CatalogServer`] owns the shared catalog and the schema built over it.
//! Transports hold a clone each and call [`CatalogServer::execute`] once per
//! request. Clones share the same catalog and schema.

use std::sync::Arc;

use async_graphql::{Request, Response, Variables};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::catalog::Catalog;
use crate::domains::schema::{CatalogSchema, build_schema};

/// A query request as sent by clients.
///
/// This is the JSON body shape accepted on POST and by the line transports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Query-language source text.
    #[serde(default)]
    pub query: String,

    /// Operation to run when the document holds several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,

    /// Variable values, as a JSON object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

impl QueryRequest {
    /// Create a request for the given query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    fn into_engine_request(self) -> Request {
        let mut request = Request::new(self.query);
        if let Some(name) = self.operation_name {
            request = request.operation_name(name);
        }
        if let Some(variables) = self.variables {
            request = request.variables(Variables::from_json(variables));
        }
        request
    }
}

/// The catalog server: shared catalog plus executable schema.
#[derive(Clone)]
pub struct CatalogServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The read-only catalog, also registered as schema data.
    catalog: Arc<Catalog>,

    /// The executable schema.
    schema: CatalogSchema,
}

impl CatalogServer {
    /// Load the configured catalog and build the server.
    ///
    /// Fails if the catalog file cannot be read or parsed.
    pub fn new(config: Config) -> Result<Self> {
        let catalog = Catalog::load(&config.catalog)?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Build the server over an already loaded catalog.
    pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let schema = build_schema(catalog.clone(), &config.limits);

        Self {
            config: Arc::new(config),
            catalog,
            schema,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the catalog being served.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get the executable schema.
    pub fn schema(&self) -> &CatalogSchema {
        &self.schema
    }

    /// Execute one query and return the engine's result.
    ///
    /// Parse, validation and resolver failures are reported in the response's
    /// `errors`; this never fails at the call level.
    #[instrument(skip_all, fields(operation = request.operation_name.as_deref()))]
    pub async fn execute(&self, request: QueryRequest) -> Response {
        debug!(query = %request.query, "Executing query");

        let response = self.schema.execute(request.into_engine_request()).await;

        if response.is_err() {
            debug!(errors = response.errors.len(), "Query finished with errors");
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server() -> CatalogServer {
        CatalogServer::with_catalog(Config::default(), Catalog::fixture())
    }

    #[tokio::test]
    async fn test_new_loads_fixture_by_default() {
        let server = CatalogServer::new(Config::default()).unwrap();
        assert_eq!(server.catalog(), &Catalog::fixture());
        assert_eq!(server.name(), "music-catalog");
    }

    #[tokio::test]
    async fn test_new_fails_on_missing_catalog_file() {
        let mut config = Config::default();
        config.catalog.data_path = Some("/nonexistent/catalog.json".into());
        assert!(CatalogServer::new(config).is_err());
    }

    #[tokio::test]
    async fn test_execute_with_variables() {
        let request = QueryRequest {
            query: "query Album($id: String!) { albums(id: $id) { title } }".to_string(),
            operation_name: Some("Album".to_string()),
            variables: Some(json!({ "id": "lz-led-zeppelin" })),
        };

        let response = server().execute(request).await;
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body, json!({ "data": { "albums": { "title": "Led Zeppelin" } } }));
    }

    #[tokio::test]
    async fn test_execute_picks_named_operation() {
        let request = QueryRequest {
            query: "query A { artists { name } } query B { songs(album: \"lz\") { id } }"
                .to_string(),
            operation_name: Some("B".to_string()),
            variables: None,
        };

        let body = serde_json::to_value(server().execute(request).await).unwrap();
        assert!(body["data"].get("artists").is_none());
        assert_eq!(body["data"]["songs"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_query_reports_error() {
        let response = server().execute(QueryRequest::new("")).await;
        assert!(response.is_err());
    }

    #[tokio::test]
    async fn test_clones_share_catalog() {
        let server = server();
        let clone = server.clone();
        assert!(std::ptr::eq(server.catalog(), clone.catalog()));
    }

    #[test]
    fn test_query_request_from_json() {
        let request: QueryRequest = serde_json::from_value(json!({
            "query": "{ artists { id } }",
            "operationName": null
        }))
        .unwrap();
        assert_eq!(request, QueryRequest::new("{ artists { id } }"));
    }
}
