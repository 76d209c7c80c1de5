//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{BookingId, PlaceId, UserId};

use crate::domain::entities::{Booking, Place};
use crate::error::LodgingResult;

/// Place repository trait
#[trait_variant::make(PlaceRepository: Send)]
pub trait LocalPlaceRepository {
    async fn create_place(&self, place: &Place) -> LodgingResult<()>;

    async fn find_place(&self, place_id: &PlaceId) -> LodgingResult<Option<Place>>;

    /// Every place, oldest first
    async fn list_places(&self) -> LodgingResult<Vec<Place>>;

    /// Places listed by `owner`, oldest first
    async fn list_places_by_owner(&self, owner: &UserId) -> LodgingResult<Vec<Place>>;

    async fn save_place(&self, place: &Place) -> LodgingResult<()>;

    /// Delete a place together with its bookings
    async fn delete_place(&self, place_id: &PlaceId) -> LodgingResult<()>;
}

/// Booking repository trait
#[trait_variant::make(BookingRepository: Send)]
pub trait LocalBookingRepository {
    /// Fails with `NotFound(Place)` if the place vanished meanwhile
    async fn create_booking(&self, booking: &Booking) -> LodgingResult<()>;

    async fn find_booking(&self, booking_id: &BookingId) -> LodgingResult<Option<Booking>>;

    /// Bookings made by `booker`, oldest first
    async fn list_bookings_by_booker(&self, booker: &UserId) -> LodgingResult<Vec<Booking>>;

    async fn delete_booking(&self, booking_id: &BookingId) -> LodgingResult<()>;
}
