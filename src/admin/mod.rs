//! Admin API: status and the configured mount table.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::lifecycle::shutdown::wait_for;
use crate::routing::MountResolver;

/// State shared by admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub resolver: Arc<MountResolver>,
    pub api_key: Arc<str>,
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/mounts", get(get_mounts))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}

/// Serve the admin API until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    state: AdminState,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    tracing::info!(address = %listener.local_addr()?, "Admin API starting");
    axum::serve(listener, setup_admin_router(state))
        .with_graceful_shutdown(wait_for(shutdown))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{MountRule, MountTable};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn state() -> AdminState {
        let table = MountTable::new(vec![
            MountRule::new("/salesdb/orders", "/api").unwrap(),
            MountRule::new("/{host[0]}/{*}", "/t/{host[0]}").unwrap(),
        ]);
        AdminState {
            resolver: Arc::new(MountResolver::new(table)),
            api_key: Arc::from("s3cret"),
        }
    }

    #[tokio::test]
    async fn test_requires_api_key() {
        let app = setup_admin_router(state());
        let response = app
            .oneshot(Request::builder().uri("/admin/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_lists_mounts_in_order() {
        let app = setup_admin_router(state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/admin/mounts")
                    .header("authorization", "Bearer s3cret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["prefix"], "/api");
        assert_eq!(body["parametric"], true);
        assert_eq!(body["mounts"][0]["where"], "/api");
        assert_eq!(body["mounts"][0]["shape"], "fixed_collection");
        assert_eq!(body["mounts"][1]["shape"], "database_any_collection");
    }
}
