//! DTOs for the paginated link listing endpoint.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::api::dto::links::LinkResponse;
use crate::application::services::ListFilters;

/// Query parameters for `GET /api/links`.
///
/// Uses `serde_with` to parse the numeric parameters from query strings.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ListQueryParams {
    /// Opaque pagination cursor from a previous page's `next_cursor`.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub cursor: Option<i64>,

    /// Page size, 1 to 100 (default: 25).
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,

    /// Substring filter on the destination URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Substring filter on the alias.
    #[serde(default)]
    pub alias: Option<String>,
}

impl ListQueryParams {
    pub fn filters(&self) -> ListFilters {
        ListFilters {
            url_contains: self.url.clone(),
            alias_contains: self.alias.clone(),
        }
    }
}

/// One page of links.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub links: Vec<LinkResponse>,

    /// Cursor for the next page; absent when this is the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<i64>,
}
