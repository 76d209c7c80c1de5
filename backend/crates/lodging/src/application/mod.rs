//! Application Layer
//!
//! Use cases for places and bookings.

pub mod manage_bookings;
pub mod manage_places;

// Re-exports
pub use manage_bookings::{BookingUseCase, BookingWithPlace};
pub use manage_places::PlaceUseCase;
