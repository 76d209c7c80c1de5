//! Domain Layer
//!
//! Places, bookings and their repository traits.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{Booking, BookingDetails, Place, PlaceDetails};
pub use repository::{BookingRepository, PlaceRepository};
pub use value_objects::StayDates;
