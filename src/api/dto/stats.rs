//! DTOs for the per-link statistics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::application::services::LinkStats;
use crate::domain::entities::VisitRecord;

/// Statistics for a single link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub alias: String,
    pub url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub visits: Vec<VisitResponse>,
}

/// One recorded visit.
///
/// `metadata` is only present for readers allowed to see request details
/// (the link's owner or an administrator).
#[derive(Debug, Serialize)]
pub struct VisitResponse {
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        let include_metadata = stats.include_metadata;
        let visits = stats
            .visits
            .into_iter()
            .map(|v| VisitResponse::redacted(v, include_metadata))
            .collect();

        Self {
            alias: stats.link.alias,
            url: stats.link.url,
            short_url: stats.link.short_url,
            clicks: stats.link.clicks,
            created_at: stats.link.created_at,
            visits,
        }
    }
}

impl VisitResponse {
    fn redacted(visit: VisitRecord, include_metadata: bool) -> Self {
        Self {
            created_at: visit.created_at,
            metadata: include_metadata.then_some(visit.metadata),
        }
    }
}
