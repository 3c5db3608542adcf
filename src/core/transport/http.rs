//! HTTP transport implementation.
//!
//! Serves the GraphQL endpoint over GET (query string) and POST (JSON body),
//! plus `/health` and a `/` info route. Every GraphQL request answers
//! `200 OK` with the engine's result object; query errors live in its
//! `errors` field.

use async_graphql::{Response, ServerError};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::{CatalogServer, QueryRequest};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Query string accepted on `GET {graphql_path}`.
///
/// Built from the raw key/value pairs so that repeated keys or undecodable
/// bytes never reject the request: the first value of each key wins and
/// invalid UTF-8 is decoded lossily.
#[derive(Debug, Default, PartialEq)]
pub struct GraphQlParams {
    /// Query text. Missing is treated as empty.
    pub query: String,

    pub operation_name: Option<String>,

    /// JSON-encoded variables object.
    pub variables: Option<String>,
}

impl GraphQlParams {
    /// Collect the parameters from decoded query string pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = None;
        let mut params = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "query" => {
                    query.get_or_insert(value);
                }
                "operationName" => {
                    params.operation_name.get_or_insert(value);
                }
                "variables" => {
                    params.variables.get_or_insert(value);
                }
                _ => {}
            }
        }

        params.query = query.unwrap_or_default();
        params
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
struct AppState {
    server: CatalogServer,
    graphql_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the router serving all HTTP routes.
    pub fn router(&self, server: CatalogServer) -> Router {
        let state = AppState {
            server,
            graphql_path: self.config.graphql_path.clone(),
        };

        let mut app = Router::new()
            .route(
                &self.config.graphql_path,
                get(handle_graphql_get).post(handle_graphql_post),
            )
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: CatalogServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → GraphQL: GET|POST {}", self.config.graphql_path);
        info!("  → Health:  GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides service info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.server.catalog();

    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "graphql": state.graphql_path,
            "health": "/health"
        },
        "catalog": {
            "artists": catalog.artists().len(),
            "albums": catalog.albums().len(),
            "songs": catalog.songs().len()
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle `GET {graphql_path}?query=...`.
#[instrument(skip_all)]
async fn handle_graphql_get(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let params = GraphQlParams::from_pairs(pairs);

    let variables = match params
        .variables
        .as_deref()
        .map(|raw| serde_json::from_str::<serde_json::Value>(raw))
        .transpose()
    {
        Ok(variables) => variables,
        Err(e) => {
            warn!("Rejected undecodable variables: {}", e);
            let response = Response::from_errors(vec![ServerError::new(
                format!("Invalid variables: {}", e),
                None,
            )]);
            return (StatusCode::OK, Json(response));
        }
    };

    let request = QueryRequest {
        query: params.query,
        operation_name: params.operation_name,
        variables,
    };

    (StatusCode::OK, Json(state.server.execute(request).await))
}

/// Handle `POST {graphql_path}` with a JSON request body.
#[instrument(skip_all)]
async fn handle_graphql_post(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> impl IntoResponse {
    (StatusCode::OK, Json(state.server.execute(request).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::catalog::Catalog;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let server = CatalogServer::with_catalog(Config::default(), Catalog::fixture());
        HttpTransport::new(HttpConfig::default()).router(server)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(query: &str) -> Request<Body> {
        let params = serde_urlencoded::to_string(&[("query", query)]).unwrap();
        Request::builder()
            .uri(format!("/graphql?{}", params))
            .body(Body::empty())
            .unwrap()
    }

    async fn get_raw(path_and_query: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(path_and_query)
            .body(Body::empty())
            .unwrap();
        send(app(), request).await
    }

    async fn get_query(params: &[(&str, &str)]) -> (StatusCode, Value) {
        let query = serde_urlencoded::to_string(params).unwrap();
        let request = Request::builder()
            .uri(format!("/graphql?{}", query))
            .body(Body::empty())
            .unwrap();
        send(app(), request).await
    }

    #[tokio::test]
    async fn test_get_artists() {
        let (status, body) = get_query(&[("query", "{ artists { id name type } }")]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "data": {
                    "artists": [{ "id": "1", "name": "Led Zeppelin", "type": "artist" }]
                }
            })
        );
    }

    #[tokio::test]
    async fn test_get_missing_argument_is_ok_with_errors() {
        let (status, body) = get_query(&[("query", "{ albums { title } }")]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], Value::Null);
        assert!(!body["errors"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_without_query_reports_error() {
        let (status, body) = get_query(&[]).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_get_with_variables() {
        let (_, body) = get_query(&[
            ("query", "query($a: String!) { songs(album: $a) { id } }"),
            ("variables", r#"{"a": "nonexistent"}"#),
        ])
        .await;
        assert_eq!(body, json!({ "data": { "songs": [] } }));
    }

    #[tokio::test]
    async fn test_get_with_bad_variables() {
        let (status, body) = get_query(&[
            ("query", "{ artists { id } }"),
            ("variables", "{not json"),
        ])
        .await;
        assert_eq!(status, StatusCode::OK);
        let message = body["errors"][0]["message"].as_str().unwrap();
        assert!(message.starts_with("Invalid variables"));
    }

    #[tokio::test]
    async fn test_get_repeated_query_uses_first() {
        let (status, body) = get_query(&[
            ("query", "{ artists { name } }"),
            ("query", "{ songs(album: \"lz\") { id } }"),
        ])
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": { "artists": [{ "name": "Led Zeppelin" }] } }));
    }

    #[tokio::test]
    async fn test_get_invalid_utf8_is_engine_error() {
        let (status, body) = get_raw("/graphql?query=%FF%FE").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], Value::Null);
        assert!(!body["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_params_from_pairs() {
        let pairs = vec![
            ("variables".to_string(), "{}".to_string()),
            ("query".to_string(), "{ a }".to_string()),
            ("other".to_string(), "x".to_string()),
            ("query".to_string(), "{ b }".to_string()),
        ];
        assert_eq!(
            GraphQlParams::from_pairs(pairs),
            GraphQlParams {
                query: "{ a }".to_string(),
                operation_name: None,
                variables: Some("{}".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_post_json_body() {
        let payload = json!({ "query": r#"{ albums(id: "lz-led-zeppelin") { title year } }"# });
        let request = Request::builder()
            .method("POST")
            .uri("/graphql")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "data": { "albums": { "title": "Led Zeppelin", "year": "1969" } } })
        );
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_root_reports_catalog_counts() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (_, body) = send(app(), request).await;
        assert_eq!(body["endpoints"]["graphql"], "/graphql");
        assert_eq!(body["catalog"], json!({ "artists": 1, "albums": 1, "songs": 2 }));
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let app = app();
        let artists = send(app.clone(), get_request("{ artists { name } }"));
        let songs = send(app, get_request(r#"{ songs(album: "lz") { title } }"#));

        let ((_, artists), (_, songs)) = tokio::join!(artists, songs);
        assert_eq!(artists, json!({ "data": { "artists": [{ "name": "Led Zeppelin" }] } }));
        assert_eq!(songs["data"]["songs"].as_array().unwrap().len(), 2);
        assert!(songs["data"].get("artists").is_none());
    }
}
