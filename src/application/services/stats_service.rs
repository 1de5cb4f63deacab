//! Per-link visit statistics with read access control.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::access_guard;
use crate::domain::entities::{Identity, Link, VisitRecord};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Statistics for a single link.
///
/// `include_metadata` is decided here, once: only the link's owner or an
/// admin sees raw visit metadata; other readers of a public link get
/// timestamps only.
#[derive(Debug)]
pub struct LinkStats {
    pub link: Link,
    pub visits: Vec<VisitRecord>,
    pub include_metadata: bool,
}

/// Service for retrieving click statistics.
pub struct StatsService {
    repo: Arc<dyn LinkRepository>,
    history_limit: i64,
}

impl StatsService {
    /// Creates a new statistics service.
    ///
    /// `history_limit` caps how many visit records a single stats read
    /// returns (newest first). Visit storage itself is unbounded.
    pub fn new(repo: Arc<dyn LinkRepository>, history_limit: i64) -> Self {
        Self {
            repo,
            history_limit,
        }
    }

    /// Retrieves click count and visit history for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias does not exist and
    /// [`AppError::Unauthorized`] if `identity` may not read the link.
    pub async fn get_stats(&self, alias: &str, identity: &Identity) -> Result<LinkStats, AppError> {
        let link = self.repo.find_by_alias(alias).await?.ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "alias": alias }))
        })?;

        if !access_guard::can_read(identity, &link) {
            return Err(AppError::unauthorized());
        }

        let visits = self.repo.visits_by_alias(alias, self.history_limit).await?;

        let include_metadata = identity.is_admin
            || (link.owner_id.is_some() && identity.user_id == link.owner_id);

        Ok(LinkStats {
            link,
            visits,
            include_metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn link(alias: &str, clicks: i64, owner: Option<&str>) -> Link {
        Link::new(
            1,
            alias.to_string(),
            "https://example.com".to_string(),
            format!("short.test/{alias}"),
            "short.test".to_string(),
            clicks,
            owner.map(String::from),
            Utc::now(),
        )
    }

    fn visit(id: i64, alias: &str) -> VisitRecord {
        VisitRecord::new(
            id,
            alias.to_string(),
            json!({"user-agent": "Mozilla/5.0"}),
            Utc::now(),
        )
    }

    fn service(repo: MockLinkRepository) -> StatsService {
        StatsService::new(Arc::new(repo), 1000)
    }

    #[tokio::test]
    async fn test_owner_sees_metadata() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_alias()
            .times(1)
            .returning(|alias| Ok(Some(link(alias, 5, Some("alice")))));
        repo.expect_visits_by_alias()
            .withf(|alias, limit| alias == "abc" && *limit == 1000)
            .times(1)
            .returning(|alias, _| Ok(vec![visit(1, alias)]));

        let stats = service(repo)
            .get_stats("abc", &Identity::user("alice"))
            .await
            .unwrap();

        assert_eq!(stats.link.clicks, 5);
        assert_eq!(stats.visits.len(), 1);
        assert!(stats.include_metadata);
    }

    #[tokio::test]
    async fn test_admin_sees_metadata() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_alias()
            .times(1)
            .returning(|alias| Ok(Some(link(alias, 0, Some("alice")))));
        repo.expect_visits_by_alias()
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let stats = service(repo)
            .get_stats("abc", &Identity::admin("root"))
            .await
            .unwrap();

        assert!(stats.include_metadata);
    }

    #[tokio::test]
    async fn test_public_link_reader_gets_timestamps_only() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_alias()
            .times(1)
            .returning(|alias| Ok(Some(link(alias, 2, None))));
        repo.expect_visits_by_alias()
            .times(1)
            .returning(|alias, _| Ok(vec![visit(1, alias)]));

        let stats = service(repo)
            .get_stats("abc", &Identity::user("bob"))
            .await
            .unwrap();

        assert!(!stats.include_metadata);
    }

    #[tokio::test]
    async fn test_non_owner_is_denied_on_owned_link() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_alias()
            .times(1)
            .returning(|alias| Ok(Some(link(alias, 0, Some("alice")))));
        repo.expect_visits_by_alias().times(0);

        let err = service(repo)
            .get_stats("abc", &Identity::user("bob"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_unknown_alias_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_alias().times(1).returning(|_| Ok(None));

        let err = service(repo)
            .get_stats("ghost", &Identity::anonymous())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}
