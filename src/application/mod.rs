//! Application layer: service orchestration and access policy.

pub mod services;
