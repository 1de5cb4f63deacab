//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with metadata.
///
/// Maps a globally unique, immutable `alias` to a destination `url`.
/// `short_url` is the denormalized display form `domain + "/" + alias`,
/// computed once at creation. `clicks` is monotonically non-decreasing;
/// `owner_id == None` marks a public, unowned link.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub alias: String,
    pub url: String,
    pub short_url: String,
    pub domain: String,
    pub clicks: i64,
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        alias: String,
        url: String,
        short_url: String,
        domain: String,
        clicks: i64,
        owner_id: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            alias,
            url,
            short_url,
            domain,
            clicks,
            owner_id,
            created_at,
        }
    }

    /// Returns true if the link has no owner and is therefore public.
    pub fn is_unowned(&self) -> bool {
        self.owner_id.is_none()
    }
}

/// Input data for creating a new link.
///
/// `clicks` starts at zero and `created_at` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub alias: String,
    pub url: String,
    pub short_url: String,
    pub domain: String,
    pub owner_id: Option<String>,
}

impl NewLink {
    /// Builds the insert payload, deriving `short_url` from domain and alias.
    pub fn build(alias: String, url: String, domain: String, owner_id: Option<String>) -> Self {
        let short_url = format!("{domain}/{alias}");
        Self {
            alias,
            url,
            short_url,
            domain,
            owner_id,
        }
    }
}
