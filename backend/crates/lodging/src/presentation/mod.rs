//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::LodgingAppState;
pub use router::{lodging_router, lodging_router_generic};
