//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, VisitRecord};
use crate::domain::repositories::{LinkFilter, LinkRepository};
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, alias, url, short_url, domain, clicks, owner_id, created_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    alias: String,
    url: String,
    short_url: String,
    domain: String,
    clicks: i64,
    owner_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id, r.alias, r.url, r.short_url, r.domain, r.clicks, r.owner_id, r.created_at,
        )
    }
}

#[derive(sqlx::FromRow)]
struct VisitRow {
    id: i64,
    link_alias: String,
    metadata: Json<Value>,
    created_at: DateTime<Utc>,
}

impl From<VisitRow> for VisitRecord {
    fn from(r: VisitRow) -> Self {
        VisitRecord::new(r.id, r.link_alias, r.metadata.0, r.created_at)
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses bound parameters throughout; the increment-and-append pair runs in
/// one transaction so concurrent redirects never lose a click.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row: LinkRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO links (alias, url, short_url, domain, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.alias)
        .bind(&new_link.url)
        .bind(&new_link.short_url)
        .bind(&new_link.domain)
        .bind(&new_link.owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> =
            sqlx::query_as(&format!("SELECT {LINK_COLUMNS} FROM links WHERE alias = $1"))
                .bind(alias)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Into::into))
    }

    async fn update_url(&self, alias: &str, new_url: &str) -> Result<Link, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(&format!(
            "UPDATE links SET url = $2 WHERE alias = $1 RETURNING {LINK_COLUMNS}"
        ))
        .bind(alias)
        .bind(new_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "alias": alias })))
    }

    async fn increment_clicks_and_record_visit(
        &self,
        alias: &str,
        metadata: Value,
    ) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;

        // Atomic in-database increment; no read-then-write in application code.
        let row: Option<LinkRow> = sqlx::query_as(&format!(
            "UPDATE links SET clicks = clicks + 1 WHERE alias = $1 RETURNING {LINK_COLUMNS}"
        ))
        .bind(alias)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            // Dropping the transaction rolls it back; nothing was mutated.
            return Err(AppError::not_found(
                "Link not found",
                json!({ "alias": alias }),
            ));
        };

        sqlx::query("INSERT INTO link_visits (link_alias, metadata) VALUES ($1, $2)")
            .bind(alias)
            .bind(Json(metadata))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete_by_alias(&self, alias: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM links WHERE alias = $1")
            .bind(alias)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "alias": alias }),
            ));
        }

        Ok(())
    }

    async fn list_page(
        &self,
        filter: LinkFilter,
        cursor: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Link>, AppError> {
        let rows: Vec<LinkRow> = sqlx::query_as(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE ($1::text IS NULL OR owner_id = $1)
              AND ($2::text IS NULL OR strpos(url, $2) > 0)
              AND ($3::text IS NULL OR strpos(alias, $3) > 0)
              AND ($4::bigint IS NULL
                   OR (created_at, id) < (SELECT created_at, id FROM links WHERE id = $4))
            ORDER BY created_at DESC, id DESC
            LIMIT $5
            "#
        ))
        .bind(&filter.owner_id)
        .bind(&filter.url_contains)
        .bind(&filter.alias_contains)
        .bind(cursor)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn visits_by_alias(&self, alias: &str, limit: i64) -> Result<Vec<VisitRecord>, AppError> {
        let rows: Vec<VisitRow> = sqlx::query_as(
            r#"
            SELECT id, link_alias, metadata, created_at
            FROM link_visits
            WHERE link_alias = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(alias)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
