//! Business logic services orchestrating the repository layer.

pub mod access_guard;

mod auth_service;
mod link_service;
mod listing_service;
mod redirect_service;
mod stats_service;

pub use auth_service::AuthService;
pub use link_service::{CreateLink, LinkService};
pub use listing_service::{LinkPage, ListFilters, ListingService};
pub use redirect_service::{RedirectService, VisitRecording};
pub use stats_service::{LinkStats, StatsService};
