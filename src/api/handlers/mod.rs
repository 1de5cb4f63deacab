//! HTTP request handlers.

mod health;
mod links;
mod list;
mod redirect;
mod stats;

pub use health::health_handler;
pub use links::{create_link_handler, delete_link_handler, update_link_handler};
pub use list::list_links_handler;
pub use redirect::redirect_handler;
pub use stats::stats_handler;
