//! Handler for the paginated link listing.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::api::dto::list::{ListQueryParams, ListResponse};
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links visible to the caller, newest first.
///
/// # Endpoint
///
/// `GET /api/links?cursor={id}&limit={n}&url={substr}&alias={substr}`
///
/// Non-admin callers only ever see their own links; admins see everything.
/// Walk the collection by passing each response's `next_cursor` back as
/// `cursor` until it is absent.
///
/// # Errors
///
/// Returns 401 for anonymous callers and 400 for an out-of-range limit.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<ListResponse>, AppError> {
    let page = state
        .listing_service
        .list(&identity, params.filters(), params.cursor, params.limit)
        .await?;

    Ok(Json(ListResponse {
        links: page.items.into_iter().map(Into::into).collect(),
        next_cursor: page.next_cursor,
    }))
}
