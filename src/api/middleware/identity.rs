//! Request identity resolution middleware.
//!
//! Resolves the caller's bearer token to an [`Identity`] and attaches it to
//! the request as an extension. Downstream handlers never see raw tokens.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the caller's identity from the `Authorization` header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// A missing header resolves to the anonymous identity; the per-route
/// access policy decides what anonymous callers may do. An unknown or
/// malformed credential is rejected with `401 Unauthorized` (with a
/// `WWW-Authenticate: Bearer` header per RFC 6750) so a typo never silently
/// downgrades a caller to anonymous.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = bearer_token(&req)?;

    let identity: Identity = st.auth_service.resolve(bearer)?;

    let mut req = req;
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Extracts the bearer token from the request, if any.
fn bearer_token(req: &Request) -> Result<Option<&str>, AppError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| AppError::unauthorized())?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Some)
        .ok_or_else(AppError::unauthorized)
}
