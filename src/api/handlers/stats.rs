//! Handler for per-link statistics.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click count and visit history for a link.
///
/// # Endpoint
///
/// `GET /api/links/{alias}/stats`
///
/// Visit metadata is included only for the link's owner or an admin; other
/// readers of a public link get visit timestamps only.
///
/// # Errors
///
/// Returns 404 for an unknown alias and 401 when the caller may not read
/// the link.
pub async fn stats_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(alias): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats_service.get_stats(&alias, &identity).await?;

    Ok(Json(stats.into()))
}
