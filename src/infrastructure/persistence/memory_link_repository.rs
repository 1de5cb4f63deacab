//! In-memory implementation of the link repository.
//!
//! Backs tests and ephemeral deployments (`STORAGE_BACKEND=memory`). All
//! state lives behind a single `RwLock`, so the increment-and-append
//! operation is naturally atomic: the write section covers both mutations.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink, VisitRecord};
use crate::domain::repositories::{LinkFilter, LinkRepository};
use crate::error::AppError;
use serde_json::json;

#[derive(Default)]
struct Inner {
    next_link_id: i64,
    next_visit_id: i64,
    links: HashMap<String, Link>,
    visits: Vec<VisitRecord>,
}

/// Lock-guarded in-memory link store.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Inner>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(link: &Link, filter: &LinkFilter) -> bool {
    if let Some(owner) = &filter.owner_id {
        if link.owner_id.as_deref() != Some(owner.as_str()) {
            return false;
        }
    }
    if let Some(needle) = &filter.url_contains {
        if !link.url.contains(needle.as_str()) {
            return false;
        }
    }
    if let Some(needle) = &filter.alias_contains {
        if !link.alias.contains(needle.as_str()) {
            return false;
        }
    }
    true
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.inner.write().await;

        if inner.links.contains_key(&new_link.alias) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "alias": new_link.alias }),
            ));
        }

        inner.next_link_id += 1;
        let link = Link::new(
            inner.next_link_id,
            new_link.alias.clone(),
            new_link.url,
            new_link.short_url,
            new_link.domain,
            0,
            new_link.owner_id,
            Utc::now(),
        );
        inner.links.insert(new_link.alias, link.clone());

        Ok(link)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.links.get(alias).cloned())
    }

    async fn update_url(&self, alias: &str, new_url: &str) -> Result<Link, AppError> {
        let mut inner = self.inner.write().await;

        let link = inner.links.get_mut(alias).ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "alias": alias }))
        })?;
        link.url = new_url.to_string();

        Ok(link.clone())
    }

    async fn increment_clicks_and_record_visit(
        &self,
        alias: &str,
        metadata: Value,
    ) -> Result<Link, AppError> {
        let mut inner = self.inner.write().await;

        let link = inner.links.get_mut(alias).ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "alias": alias }))
        })?;
        link.clicks += 1;
        let link = link.clone();

        inner.next_visit_id += 1;
        let visit = VisitRecord::new(
            inner.next_visit_id,
            alias.to_string(),
            metadata,
            Utc::now(),
        );
        inner.visits.push(visit);

        Ok(link)
    }

    async fn delete_by_alias(&self, alias: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;

        if inner.links.remove(alias).is_none() {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "alias": alias }),
            ));
        }
        inner.visits.retain(|v| v.link_alias != alias);

        Ok(())
    }

    async fn list_page(
        &self,
        filter: LinkFilter,
        cursor: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Link>, AppError> {
        let inner = self.inner.read().await;

        // Resolve the cursor id to its sort key. A stale cursor (the link was
        // deleted since the previous page) yields an empty page, matching the
        // SQL subselect behavior.
        let cursor_key = match cursor {
            None => None,
            Some(id) => match inner.links.values().find(|l| l.id == id) {
                Some(l) => Some((l.created_at, l.id)),
                None => return Ok(Vec::new()),
            },
        };

        let mut items: Vec<Link> = inner
            .links
            .values()
            .filter(|l| matches_filter(l, &filter))
            .filter(|l| match cursor_key {
                // Descending order: "after the cursor" means a smaller key.
                Some(key) => (l.created_at, l.id) < key,
                None => true,
            })
            .cloned()
            .collect();

        items.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        items.truncate(limit.max(0) as usize);

        Ok(items)
    }

    async fn visits_by_alias(&self, alias: &str, limit: i64) -> Result<Vec<VisitRecord>, AppError> {
        let inner = self.inner.read().await;

        let mut visits: Vec<VisitRecord> = inner
            .visits
            .iter()
            .filter(|v| v.link_alias == alias)
            .cloned()
            .collect();
        visits.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        visits.truncate(limit.max(0) as usize);

        Ok(visits)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
