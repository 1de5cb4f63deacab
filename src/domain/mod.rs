//! Domain layer: entities, repository contracts, and the visit pipeline.

pub mod entities;
pub mod repositories;
pub mod visit_event;
pub mod visit_worker;
