//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink, VisitRecord};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Filter applied to a paginated link listing.
///
/// All present fields are AND-combined. `owner_id` is set by the listing
/// service, never by the caller directly: non-admin identities are always
/// scoped to their own links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkFilter {
    pub owner_id: Option<String>,
    pub url_contains: Option<String>,
    pub alias_contains: Option<String>,
}

/// Store interface for shortened links and their visit history.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-memory,
///   used in tests and for ephemeral deployments
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the alias already exists.
    /// Returns [`AppError::Internal`] on store errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError>;

    /// Replaces the destination URL of an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `alias`.
    /// Returns [`AppError::Internal`] on store errors.
    async fn update_url(&self, alias: &str, new_url: &str) -> Result<Link, AppError>;

    /// Atomically increments the click counter and appends a visit record.
    ///
    /// The increment and the append either both happen or neither does, and
    /// no concurrent caller observes an intermediate state. Returns the link
    /// as it stands after the increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `alias`; in that
    /// case nothing is mutated.
    /// Returns [`AppError::Internal`] on store errors.
    async fn increment_clicks_and_record_visit(
        &self,
        alias: &str,
        metadata: Value,
    ) -> Result<Link, AppError>;

    /// Deletes a link and its visit history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `alias`.
    /// Returns [`AppError::Internal`] on store errors.
    async fn delete_by_alias(&self, alias: &str) -> Result<(), AppError>;

    /// Lists links matching `filter`, ordered by `created_at DESC, id DESC`.
    ///
    /// `cursor` is the id of the last item of the previous page; the page
    /// starts strictly after that item in sort order. A cursor pointing at a
    /// link that no longer exists yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn list_page(
        &self,
        filter: LinkFilter,
        cursor: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Link>, AppError>;

    /// Returns up to `limit` visit records for a link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn visits_by_alias(&self, alias: &str, limit: i64) -> Result<Vec<VisitRecord>, AppError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
