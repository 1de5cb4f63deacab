//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{
    AuthService, LinkService, ListingService, RedirectService, StatsService,
};
use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::domain::visit_event::VisitEvent;

/// Shared state for all HTTP handlers.
///
/// Services hold the repository as a trait object, so the same state type
/// works over the PostgreSQL and in-memory backends.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub listing_service: Arc<ListingService>,
    pub stats_service: Arc<StatsService>,
    pub auth_service: Arc<AuthService>,
    pub store: Arc<dyn LinkRepository>,
    /// Kept for health reporting on the detached visit queue.
    pub visit_tx: mpsc::Sender<VisitEvent>,
}

impl AppState {
    /// Wires all services over the given repository.
    ///
    /// `visit_tx` is the sending side of the detached visit queue; the
    /// matching receiver must be drained by
    /// [`crate::domain::visit_worker::run_visit_worker`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured token spec is malformed.
    pub fn build(
        repo: Arc<dyn LinkRepository>,
        config: &Config,
        visit_tx: mpsc::Sender<VisitEvent>,
    ) -> anyhow::Result<Self> {
        let auth_service = Arc::new(AuthService::from_spec(&config.api_tokens)?);
        let link_service = Arc::new(LinkService::new(
            repo.clone(),
            config.domains.clone(),
            config.alias_length,
            config.alias_max_retries,
        ));
        let redirect_service = Arc::new(RedirectService::new(
            repo.clone(),
            config.visit_recording,
            visit_tx.clone(),
        ));
        let listing_service = Arc::new(ListingService::new(repo.clone()));
        let stats_service = Arc::new(StatsService::new(repo.clone(), config.visit_history_limit));

        Ok(Self {
            link_service,
            redirect_service,
            listing_service,
            stats_service,
            auth_service,
            store: repo,
            visit_tx,
        })
    }
}
