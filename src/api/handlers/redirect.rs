//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_metadata;

/// Redirects an alias to its destination URL and records the visit.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// The token is normally the alias itself. Percent-encoded legacy tokens of
/// the form `domain%2Falias` are accepted; the alias is their trailing
/// segment.
///
/// # Visit Recording
///
/// Each successful redirect increments the click counter and appends a
/// visit record whose metadata is a snapshot of the request headers with
/// credential headers removed. An unknown alias redirects to `/` and
/// touches nothing.
///
/// # Errors
///
/// Returns 500 only when the store fails; a miss is not an error.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    let metadata = request_metadata::snapshot(&headers);

    match state.redirect_service.resolve(&token, metadata).await? {
        Some(url) => Ok(Redirect::temporary(&url)),
        None => Ok(Redirect::temporary("/")),
    }
}
