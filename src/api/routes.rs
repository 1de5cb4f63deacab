//! API route configuration.
//!
//! All API endpoints resolve the caller's identity via
//! [`crate::api::middleware::identity`]; per-endpoint access policy is
//! enforced in the services.

use axum::{
    Router,
    routing::{get, patch},
};

use crate::api::handlers::{
    create_link_handler, delete_link_handler, list_links_handler, stats_handler,
    update_link_handler,
};
use crate::state::AppState;

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /links`               - List links (paginated, owner-scoped)
/// - `POST   /links`               - Create a short link
/// - `PATCH  /links/{alias}`       - Change a link's destination
/// - `DELETE /links/{alias}`       - Delete a link and its history
/// - `GET    /links/{alias}/stats` - Click count and visit history
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{alias}",
            patch(update_link_handler).delete(delete_link_handler),
        )
        .route("/links/{alias}/stats", get(stats_handler))
}
