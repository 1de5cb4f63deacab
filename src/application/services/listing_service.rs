//! Owner-scoped, cursor-paginated link listing.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Identity, Link};
use crate::domain::repositories::{LinkFilter, LinkRepository};
use crate::error::AppError;

const DEFAULT_LIMIT: i64 = 25;
const MAX_LIMIT: i64 = 100;

/// Caller-supplied free-text filters, AND-combined.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    pub url_contains: Option<String>,
    pub alias_contains: Option<String>,
}

/// One page of links plus the cursor for the next one.
///
/// `next_cursor` is present iff the page came back full; a short page
/// signals the end of the collection. The client's own stopping rule, not
/// server state, terminates the walk.
#[derive(Debug)]
pub struct LinkPage {
    pub items: Vec<Link>,
    pub next_cursor: Option<i64>,
}

/// Service enumerating links with enforced owner scoping.
pub struct ListingService {
    repo: Arc<dyn LinkRepository>,
}

impl ListingService {
    /// Creates a new listing service.
    pub fn new(repo: Arc<dyn LinkRepository>) -> Self {
        Self { repo }
    }

    /// Returns one page of links visible to `identity`.
    ///
    /// Non-admin identities are forced to their own `owner_id` scope no
    /// matter what they ask for; admins see the unfiltered collection.
    /// Ordering is `created_at DESC, id DESC`; `cursor` is the id of the
    /// last item of the previous page and is excluded from the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an anonymous identity and
    /// [`AppError::Validation`] for an out-of-range limit.
    pub async fn list(
        &self,
        identity: &Identity,
        filters: ListFilters,
        cursor: Option<i64>,
        limit: Option<i64>,
    ) -> Result<LinkPage, AppError> {
        if identity.is_anonymous() {
            return Err(AppError::unauthorized());
        }

        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::bad_request(
                "Limit out of range",
                json!({ "limit": limit, "max": MAX_LIMIT }),
            ));
        }

        let owner_id = if identity.is_admin {
            None
        } else {
            identity.user_id.clone()
        };

        let filter = LinkFilter {
            owner_id,
            url_contains: filters.url_contains,
            alias_contains: filters.alias_contains,
        };

        let items = self.repo.list_page(filter, cursor, limit).await?;
        let next_cursor = if items.len() as i64 == limit {
            items.last().map(|l| l.id)
        } else {
            None
        };

        Ok(LinkPage { items, next_cursor })
    }
}
