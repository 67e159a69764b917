//! Application router assembly.
//!
//! Combines the policy API with the static frontend and wraps everything in
//! the shared middleware stack.

use std::time::Duration;

use axum::extract::{DefaultBodyLimit, Request};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use http::{HeaderName, HeaderValue, StatusCode};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;

use super::policy::dto::ErrorResponse;
use super::policy::{policy_router, PolicyAppState};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the full application router.
///
/// - `/api/*` policy endpoints
/// - `GET /` serves `{static_dir}/index.html`
/// - any other path falls back to files under `static_dir`
pub fn build_app(state: PolicyAppState, server: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let index = server.static_dir.join("index.html");

    Router::new()
        .merge(policy_router())
        .route_service("/", ServeFile::new(index))
        .fallback_service(ServeDir::new(&server.static_dir))
        .with_state(state)
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(timeout_envelope))
        .layer(cors_layer(server))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Gives the timeout layer's bare 408 the usual failure envelope.
async fn timeout_envelope(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    warn!("Request timed out");
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(ErrorResponse::new("Request timed out")),
    )
        .into_response()
}

/// CORS: any origin unless an explicit list is configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
