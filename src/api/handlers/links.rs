//! Handlers for link creation, update, and deletion.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::links::{CreateLinkRequest, DeleteResponse, LinkResponse, UpdateLinkRequest};
use crate::application::services::CreateLink;
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/very/long/path",
///   "alias": "my-link",           // optional, generated when absent
///   "domain": "short.example.com" // optional, default domain when absent
/// }
/// ```
///
/// # Errors
///
/// Returns 400 for an invalid URL, alias, or domain; 409 when a custom
/// alias is already taken; 503 when random allocation exhausted its
/// retries.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let link = state
        .link_service
        .create_link(
            CreateLink {
                url: payload.url,
                alias: payload.alias,
                domain: payload.domain,
            },
            &identity,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Replaces a link's destination URL.
///
/// # Endpoint
///
/// `PATCH /api/links/{alias}`
///
/// # Errors
///
/// Returns 404 for an unknown alias, 401 when the caller may not edit the
/// link, and 400 for an invalid URL.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(alias): Path<String>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .link_service
        .update_url(&alias, &payload.url, &identity)
        .await?;

    Ok(Json(link.into()))
}

/// Deletes a link and its visit history.
///
/// # Endpoint
///
/// `DELETE /api/links/{alias}`
///
/// # Errors
///
/// Returns 404 for an unknown alias and 401 when the caller may not delete
/// the link.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(alias): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.link_service.delete(&alias, &identity).await?;

    Ok(Json(DeleteResponse { status: true }))
}
