//! DTOs for link creation and mutation endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Request to create a short link.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    /// The destination URL (must be valid HTTP/HTTPS).
    pub url: String,

    /// Optional custom alias. Empty or absent means a random alias is
    /// allocated.
    #[serde(default)]
    pub alias: Option<String>,

    /// Optional domain override (otherwise uses the default domain).
    #[serde(default)]
    pub domain: Option<String>,
}

/// Request to change a link's destination.
#[derive(Debug, Deserialize)]
pub struct UpdateLinkRequest {
    pub url: String,
}

/// A link as returned by the API.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub alias: String,
    pub url: String,
    pub short_url: String,
    pub domain: String,
    pub clicks: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            alias: link.alias,
            url: link.url,
            short_url: link.short_url,
            domain: link.domain,
            clicks: link.clicks,
            owner_id: link.owner_id,
            created_at: link.created_at,
        }
    }
}

/// Response for a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: bool,
}
