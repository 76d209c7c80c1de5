//! Booking Use Cases
//!
//! The booker is always the authenticated caller, never a client-supplied
//! field.

use std::sync::Arc;

use auth::{Action, Caller, OwnershipGuard};
use kernel::id::BookingId;

use crate::domain::entities::{Booking, BookingDetails, Place};
use crate::domain::repository::{BookingRepository, PlaceRepository};
use crate::error::{LodgingError, LodgingResult, Resource};

/// A booking with the place it refers to, if that still exists
#[derive(Debug, Clone)]
pub struct BookingWithPlace {
    pub booking: Booking,
    pub place: Option<Place>,
}

pub struct BookingUseCase<R>
where
    R: PlaceRepository + BookingRepository,
{
    repo: Arc<R>,
}

impl<R> BookingUseCase<R>
where
    R: PlaceRepository + BookingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_own(&self, caller: &Caller) -> LodgingResult<Vec<BookingWithPlace>> {
        let identity = OwnershipGuard::authenticated(caller, Action::ReadOwnList).map_err(
            |denial| LodgingError::denied(denial, Action::ReadOwnList, Resource::Booking),
        )?;

        let bookings = self.repo.list_bookings_by_booker(&identity.id).await?;

        let mut views = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let place = self.repo.find_place(&booking.place_id).await?;
            views.push(BookingWithPlace { booking, place });
        }
        Ok(views)
    }

    pub async fn create(&self, caller: &Caller, details: BookingDetails) -> LodgingResult<Booking> {
        let identity = OwnershipGuard::authenticated(caller, Action::Create)
            .map_err(|denial| LodgingError::denied(denial, Action::Create, Resource::Booking))?;

        let place = self
            .repo
            .find_place(&details.place_id)
            .await?
            .ok_or(LodgingError::NotFound(Resource::Place))?;
        details.validate_for(&place)?;

        let booking = Booking::new(identity.id, details);
        self.repo.create_booking(&booking).await?;

        tracing::info!(
            booking_id = %booking.id,
            place_id = %booking.place_id,
            booker = %booking.booker,
            "Booking created"
        );

        Ok(booking)
    }

    pub async fn delete(&self, caller: &Caller, booking_id: &BookingId) -> LodgingResult<()> {
        let booking =
            OwnershipGuard::fetch_authorized(caller, Action::Delete, || {
                self.repo.find_booking(booking_id)
            })
            .await?
            .map_err(|denial| LodgingError::denied(denial, Action::Delete, Resource::Booking))?;

        self.repo.delete_booking(&booking.id).await?;

        tracing::info!(booking_id = %booking.id, "Booking deleted");

        Ok(())
    }
}
