//! Core business entities.

mod identity;
mod link;
mod visit;

pub use identity::Identity;
pub use link::{Link, NewLink};
pub use visit::VisitRecord;
