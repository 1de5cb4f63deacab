//! Background worker draining the detached visit queue.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::domain::repositories::LinkRepository;
use crate::domain::visit_event::VisitEvent;

/// Consumes queued visit events and applies them through the atomic store
/// operation.
///
/// Detached recording is best-effort for the *caller*: the redirect response
/// has already been sent by the time an event is processed here. The counter
/// increment and the history append still go through
/// [`LinkRepository::increment_clicks_and_record_visit`], so the two writes
/// stay coupled. Failures never reach the visitor and are reported through
/// logging instead.
///
/// Runs until the sending side of the channel is dropped.
pub async fn run_visit_worker(mut rx: mpsc::Receiver<VisitEvent>, repo: Arc<dyn LinkRepository>) {
    while let Some(event) = rx.recv().await {
        match repo
            .increment_clicks_and_record_visit(&event.alias, event.metadata)
            .await
        {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                // Link deleted between redirect and drain; nothing to record.
                debug!(alias = %event.alias, "link gone before visit was recorded");
            }
            Err(e) => {
                error!(alias = %event.alias, error = %e, "failed to record visit");
            }
        }
    }
}
