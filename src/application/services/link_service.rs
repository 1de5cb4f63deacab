//! Link creation, edit, and delete service.

use std::sync::Arc;

use crate::application::services::access_guard;
use crate::domain::entities::{Identity, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::alias_generator::{generate_alias, validate_custom_alias};
use serde_json::json;
use url::Url;

/// Input for creating a shortened link.
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub url: String,
    pub alias: Option<String>,
    pub domain: Option<String>,
}

/// Service for allocating aliases and managing link lifecycle.
///
/// Allocation is collision-resistant: generated aliases are inserted
/// optimistically and retried on conflict, while caller-chosen aliases get
/// exactly one attempt. There is no find-then-insert window, so two
/// concurrent creations can never both claim the same alias.
pub struct LinkService {
    repo: Arc<dyn LinkRepository>,
    domains: Vec<String>,
    alias_length: usize,
    max_retries: usize,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `domains` is the configured allow-list; its first entry is the
    /// default domain.
    pub fn new(
        repo: Arc<dyn LinkRepository>,
        domains: Vec<String>,
        alias_length: usize,
        max_retries: usize,
    ) -> Self {
        Self {
            repo,
            domains,
            alias_length,
            max_retries,
        }
    }

    /// Creates a committed link for the caller.
    ///
    /// The link is owned by `identity` when it is authenticated, otherwise
    /// it is public. A caller-chosen alias is attempted exactly once; a
    /// conflict surfaces as [`AppError::Conflict`] naming the alias, never a
    /// silent replacement. Without a chosen alias, random aliases are drawn
    /// and inserted until one sticks, up to the configured retry count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid URL, an unsupported
    /// domain, or a malformed alias; [`AppError::Conflict`] for a taken
    /// caller-chosen alias; [`AppError::AllocationExhausted`] when every
    /// random draw collided.
    pub async fn create_link(
        &self,
        input: CreateLink,
        identity: &Identity,
    ) -> Result<Link, AppError> {
        let url = validate_destination_url(&input.url)?;
        let domain = self.resolve_domain(input.domain)?;
        let owner_id = identity.user_id.clone();

        // An empty alias field means "generate one for me".
        let custom = input.alias.filter(|a| !a.is_empty());

        match custom {
            Some(alias) => {
                validate_custom_alias(&alias)?;

                match self
                    .repo
                    .insert(NewLink::build(alias.clone(), url, domain, owner_id))
                    .await
                {
                    Ok(link) => Ok(link),
                    Err(e) if e.is_conflict() => Err(AppError::conflict(
                        "Alias already taken",
                        json!({ "alias": alias }),
                    )),
                    Err(e) => Err(e),
                }
            }
            None => self.allocate_generated(url, domain, owner_id).await,
        }
    }

    /// Replaces the destination URL of an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias does not exist,
    /// [`AppError::Unauthorized`] if `identity` may not write the link, and
    /// [`AppError::Validation`] for an invalid URL.
    pub async fn update_url(
        &self,
        alias: &str,
        new_url: &str,
        identity: &Identity,
    ) -> Result<Link, AppError> {
        let new_url = validate_destination_url(new_url)?;

        let link = self.get_link(alias).await?;
        if !access_guard::can_write(identity, &link) {
            return Err(AppError::unauthorized());
        }

        self.repo.update_url(alias, &new_url).await
    }

    /// Deletes a link and its visit history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias does not exist and
    /// [`AppError::Unauthorized`] if `identity` may not delete the link.
    pub async fn delete(&self, alias: &str, identity: &Identity) -> Result<(), AppError> {
        let link = self.get_link(alias).await?;
        if !access_guard::can_delete(identity, &link) {
            return Err(AppError::unauthorized());
        }

        self.repo.delete_by_alias(alias).await
    }

    async fn get_link(&self, alias: &str) -> Result<Link, AppError> {
        self.repo.find_by_alias(alias).await?.ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "alias": alias }))
        })
    }

    /// Draws random aliases and inserts until one commits.
    ///
    /// Only uniqueness conflicts are retried; any other store failure aborts
    /// immediately.
    async fn allocate_generated(
        &self,
        url: String,
        domain: String,
        owner_id: Option<String>,
    ) -> Result<Link, AppError> {
        for _ in 0..self.max_retries {
            let alias = generate_alias(self.alias_length);
            match self
                .repo
                .insert(NewLink::build(
                    alias,
                    url.clone(),
                    domain.clone(),
                    owner_id.clone(),
                ))
                .await
            {
                Ok(link) => return Ok(link),
                Err(e) if e.is_conflict() => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::allocation_exhausted(
            "Failed to allocate a unique alias",
            json!({ "retries": self.max_retries }),
        ))
    }

    fn resolve_domain(&self, requested: Option<String>) -> Result<String, AppError> {
        match requested {
            None => Ok(self.domains[0].clone()),
            Some(d) if self.domains.iter().any(|known| known == &d) => Ok(d),
            Some(d) => Err(AppError::bad_request(
                "Unsupported domain",
                json!({ "domain": d, "supported": self.domains }),
            )),
        }
    }
}

/// Checks that the destination is an absolute http(s) URL.
fn validate_destination_url(raw: &str) -> Result<String, AppError> {
    let parsed = Url::parse(raw).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::bad_request(
            "URL must use http or https",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    // Stored as given; the destination is otherwise treated as opaque.
    Ok(raw.to_string())
}
