//! Shared helpers with no business logic of their own.

pub mod alias_generator;
pub mod request_metadata;
