//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{token}` - Short link redirect (public)
//! - `GET /health`  - Health check: store and visit queue (public)
//! - `/api/*`       - REST API (identity resolved from bearer token)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Identity** - Bearer token resolution on API routes

use axum::routing::get;
use axum::{Router, middleware};

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{identity, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let api_router = api::routes::api_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        identity::layer,
    ));

    Router::new()
        .route("/{token}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
