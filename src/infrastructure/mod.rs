//! Infrastructure layer: database and other external integrations.

pub mod persistence;
