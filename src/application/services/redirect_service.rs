//! Redirect resolution and visit recording.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::repositories::LinkRepository;
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;

/// How the redirect path records visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitRecording {
    /// The redirect response waits for the counter increment and history
    /// append to commit. The default.
    Synchronous,
    /// The redirect responds immediately; the visit is queued for the
    /// background worker. Failures are logged, never surfaced to the
    /// visitor.
    Detached,
}

impl std::str::FromStr for VisitRecording {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" | "synchronous" => Ok(Self::Synchronous),
            "detached" => Ok(Self::Detached),
            other => Err(format!(
                "invalid visit recording mode '{other}' (expected 'sync' or 'detached')"
            )),
        }
    }
}

/// Service resolving an alias to its destination and counting the visit.
///
/// Per request: lookup, then either the atomic increment-and-append (sync
/// mode, the destination is read from the op's return value so lookup and
/// count can never disagree) or a channel hand-off to the worker (detached
/// mode). A miss performs zero store mutations.
pub struct RedirectService {
    repo: Arc<dyn LinkRepository>,
    mode: VisitRecording,
    visit_tx: mpsc::Sender<VisitEvent>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        repo: Arc<dyn LinkRepository>,
        mode: VisitRecording,
        visit_tx: mpsc::Sender<VisitEvent>,
    ) -> Self {
        Self {
            repo,
            mode,
            visit_tx,
        }
    }

    /// Resolves a path token to its destination URL, recording the visit.
    ///
    /// Returns `Ok(None)` for an unknown alias; the caller decides the
    /// fallback location. `metadata` must already have credential headers
    /// stripped (see [`crate::utils::request_metadata::snapshot`]).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store fails in a way that
    /// affects the response; detached-mode recording failures are only
    /// logged.
    pub async fn resolve(&self, token: &str, metadata: Value) -> Result<Option<String>, AppError> {
        let alias = normalize_token(token);
        if alias.is_empty() {
            return Ok(None);
        }

        match self.mode {
            VisitRecording::Synchronous => {
                match self
                    .repo
                    .increment_clicks_and_record_visit(alias, metadata)
                    .await
                {
                    Ok(link) => Ok(Some(link.url)),
                    Err(e) if e.is_not_found() => Ok(None),
                    Err(e) => Err(e),
                }
            }
            VisitRecording::Detached => {
                let Some(link) = self.repo.find_by_alias(alias).await? else {
                    return Ok(None);
                };

                let event = VisitEvent::new(link.alias.clone(), metadata);
                if self.visit_tx.try_send(event).is_err() {
                    // Queue full or worker gone. The click for this visit is
                    // skipped along with its history entry, keeping the two
                    // coupled.
                    warn!(alias = %link.alias, "visit queue full, dropping visit");
                }

                Ok(Some(link.url))
            }
        }
    }
}

/// Extracts the alias from a path token.
///
/// Normally the token is the alias itself. In legacy mode the inbound path
/// carries the full stored short token (`domain/alias`, percent-encoded);
/// the alias is its trailing segment.
fn normalize_token(token: &str) -> &str {
    token.rsplit('/').next().unwrap_or(token)
}
