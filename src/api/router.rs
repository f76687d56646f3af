//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//!
//! Middleware stack (outermost → innermost):
//! 1. CORS → 2. Request logger

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Every route the service exposes, as `(method, path)`. Logged at startup.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET, POST", "/patients"),
    ("GET", "/patients/:id"),
    ("GET, POST", "/patients/:id/tests"),
    ("GET", "/patients/:id/tests/latest"),
    ("GET, POST", "/patients/:id/treatments"),
    ("GET", "/critical-patients"),
    ("POST", "/login"),
    ("POST", "/user"),
    ("GET", "/health"),
];

/// Build the API router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route("/patients/:id", get(endpoints::patients::detail))
        .route(
            "/patients/:id/tests",
            get(endpoints::readings::list).post(endpoints::readings::record),
        )
        .route(
            "/patients/:id/tests/latest",
            get(endpoints::readings::latest),
        )
        .route(
            "/patients/:id/treatments",
            get(endpoints::treatments::list).post(endpoints::treatments::record),
        )
        .route("/critical-patients", get(endpoints::critical::list))
        .route("/login", post(endpoints::auth::login))
        .route("/user", post(endpoints::auth::create_user))
        .fallback(unknown_route)
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(CorsLayer::permissive())
}

async fn unknown_route(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
