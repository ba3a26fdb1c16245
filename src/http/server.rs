//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the resolution handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener, stop on shutdown signal
//! - Resolve every request path against the mount table
//! - Turn over-deep paths into 404s (the resolver only flags them)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, TenancyConfig};
use crate::http::request::{request_id, MakeRequestUuid};
use crate::http::tenant::extract_tenant_id;
use crate::lifecycle::shutdown::wait_for;
use crate::observability::metrics;
use crate::routing::matcher::normalize;
use crate::routing::{MountError, MountResolver, MountTable};

/// Response header carrying the canonical MongoDB resource path.
pub static X_MONGO_RESOURCE_PATH: HeaderName = HeaderName::from_static("x-mongo-resource-path");

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<MountResolver>,
    pub tenancy: Arc<TenancyConfig>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    resolver: Arc<MountResolver>,
}

impl HttpServer {
    /// Create a server around an already compiled resolver.
    pub fn new(config: GatewayConfig, resolver: Arc<MountResolver>) -> Self {
        let state = AppState {
            resolver: resolver.clone(),
            tenancy: Arc::new(config.tenancy.clone()),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            resolver,
        }
    }

    /// Compile the configured mounts and create the server.
    pub fn from_config(config: GatewayConfig) -> Result<Self, MountError> {
        let resolver = Arc::new(MountResolver::new(MountTable::from_config(&config.mounts)?));
        Ok(Self::new(config, resolver))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(root_handler))
            .route("/{*path}", any(path_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request_id(req.headers()),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mounts = self.resolver.table().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Arc<MountResolver> {
        &self.resolver
    }
}

async fn root_handler(State(state): State<AppState>, method: Method, headers: HeaderMap) -> Response {
    resolve_request(&state, &method, &headers, "/")
}

async fn path_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    // The wildcard capture drops the leading slash.
    resolve_request(&state, &method, &headers, &normalize(&path))
}

/// Resolve a (decoded) request path and answer with the resolved context.
fn resolve_request(state: &AppState, method: &Method, headers: &HeaderMap, path: &str) -> Response {
    let start = Instant::now();
    let tenant_id = extract_tenant_id(headers, &state.tenancy);
    let ctx = state.resolver.resolve(path, tenant_id.as_deref());

    metrics::record_resolution(ctx.shape, ctx.has_extra_path_segments);

    let response = if ctx.has_extra_path_segments {
        tracing::warn!(
            request_id = %request_id(headers),
            path = %path,
            shape = ctx.shape,
            "Path has extra segments"
        );
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "path has more segments than the mount allows",
                "path": path,
            })),
        )
            .into_response()
    } else {
        tracing::debug!(
            request_id = %request_id(headers),
            method = %method,
            resource_path = %ctx.canonical_resource_path,
            "Resolved"
        );
        let header = HeaderValue::from_str(&ctx.canonical_resource_path).ok();
        let mut response = Json(ctx).into_response();
        if let Some(value) = header {
            response.headers_mut().insert(&X_MONGO_RESOURCE_PATH, value);
        }
        response
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MountConfig;
    use crate::http::request::X_REQUEST_ID;
    use tower::ServiceExt;

    fn server(mounts: Vec<MountConfig>) -> HttpServer {
        let config = GatewayConfig {
            mounts,
            ..Default::default()
        };
        HttpServer::from_config(config).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_resolves_fixed_collection_mount() {
        let app = server(vec![MountConfig::new("/salesdb/orders", "/api")]).router();

        let response = app
            .oneshot(Request::builder().uri("/api/123").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(&X_MONGO_RESOURCE_PATH).unwrap(),
            "/salesdb/orders/123"
        );
        assert!(response.headers().contains_key(&X_REQUEST_ID));

        let body = body_json(response).await;
        assert_eq!(body["database"], "salesdb");
        assert_eq!(body["collection"], "orders");
        assert_eq!(body["can_delete_collection"], false);
    }

    #[tokio::test]
    async fn test_extra_segments_are_not_found() {
        let app = server(vec![MountConfig::new("/salesdb/orders", "/api")]).router();

        let response = app
            .oneshot(Request::builder().uri("/api/123/extra").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_path() {
        let app = server(vec![]).router();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["database"], serde_json::Value::Null);
        assert_eq!(body["can_create_sibling_database"], true);
        assert_eq!(body["canonical_resource_path"], "/");
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let app = server(vec![]).router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/db")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get(&X_REQUEST_ID).unwrap(), "req-42");
    }

    #[tokio::test]
    async fn test_tenant_from_host() {
        let mut config = GatewayConfig {
            mounts: vec![MountConfig::new("/{host[0]}_db/{*}", "/")],
            ..Default::default()
        };
        config.tenancy.enabled = true;
        let app = HttpServer::from_config(config).unwrap().router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/7")
                    .header("host", "acme.example.com")
                    .method(Method::DELETE)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["database"], "acme_db");
        assert_eq!(body["canonical_resource_path"], "/acme_db/users/7");
        assert_eq!(body["has_parametric_mounts"], true);
    }
}
