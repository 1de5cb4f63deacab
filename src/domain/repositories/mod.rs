//! Repository traits abstracting the durable store.

mod link_repository;

pub use link_repository::{LinkFilter, LinkRepository};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
