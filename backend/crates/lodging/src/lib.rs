//! Lodging Backend Module
//!
//! Places offered by hosts and bookings made by guests.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Access Model
//! - Browsing places is public
//! - Every write and every "my ..." listing requires a session
//! - Updates and deletes are limited to the recorded owner (host or booker)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{LodgingError, LodgingResult, Resource};
pub use infra::{MemoryLodgingRepository, PgLodgingRepository};
pub use presentation::router::{lodging_router, lodging_router_generic};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
