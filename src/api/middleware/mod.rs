//! HTTP middleware for identity resolution and observability.

pub mod identity;
pub mod tracing;
