//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /ping`               - Liveness probe
//! - `GET  /r/{short_name}`     - Short link redirect
//! - `/api/*`                   - REST API
//!
//! Anything else answers `404 {"error": "not found"}`.
//!
//! # Middleware
//!
//! - **Panic recovery** - A panicking handler becomes a 500 JSON response
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{ping_handler, redirect_handler};
use crate::api::middleware::{panic, tracing};
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path
/// normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/r/{short_name}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(fallback_handler)
        .with_state(state)
        .layer(panic::layer())
        .layer(tracing::layer())
}

/// Constructs the served application: [`router`] behind trailing-slash
/// trimming.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

async fn fallback_handler() -> AppError {
    AppError::not_found()
}
