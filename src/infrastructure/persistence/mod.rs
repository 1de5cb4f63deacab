//! Store implementations behind the repository traits.

mod memory_link_repository;
mod pg_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
