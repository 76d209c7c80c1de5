//! In-memory lodging store
//!
//! Places and bookings share one lock so that deleting a place and its
//! bookings, or booking a place that is being deleted, stays consistent.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{BookingId, PlaceId, UserId};
use tokio::sync::RwLock;

use crate::domain::entities::{Booking, Place};
use crate::domain::repository::{BookingRepository, PlaceRepository};
use crate::error::{LodgingError, LodgingResult, Resource};

#[derive(Default)]
struct Tables {
    places: HashMap<PlaceId, Place>,
    bookings: HashMap<BookingId, Booking>,
}

#[derive(Clone, Default)]
pub struct MemoryLodgingRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryLodgingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn oldest_first<T, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    items.sort_by_key(|item| key(item));
    items
}

impl PlaceRepository for MemoryLodgingRepository {
    async fn create_place(&self, place: &Place) -> LodgingResult<()> {
        let mut tables = self.tables.write().await;
        if tables.places.contains_key(&place.id) {
            return Err(LodgingError::Internal(format!(
                "Place {} already exists",
                place.id
            )));
        }
        tables.places.insert(place.id, place.clone());
        Ok(())
    }

    async fn find_place(&self, place_id: &PlaceId) -> LodgingResult<Option<Place>> {
        Ok(self.tables.read().await.places.get(place_id).cloned())
    }

    async fn list_places(&self) -> LodgingResult<Vec<Place>> {
        let places = self.tables.read().await.places.values().cloned().collect();
        Ok(oldest_first(places, |place: &Place| place.created_at))
    }

    async fn list_places_by_owner(&self, owner: &UserId) -> LodgingResult<Vec<Place>> {
        let places = self
            .tables
            .read()
            .await
            .places
            .values()
            .filter(|place| &place.owner == owner)
            .cloned()
            .collect();
        Ok(oldest_first(places, |place: &Place| place.created_at))
    }

    async fn save_place(&self, place: &Place) -> LodgingResult<()> {
        let mut tables = self.tables.write().await;
        match tables.places.get_mut(&place.id) {
            Some(stored) => {
                *stored = place.clone();
                Ok(())
            }
            None => Err(LodgingError::NotFound(Resource::Place)),
        }
    }

    async fn delete_place(&self, place_id: &PlaceId) -> LodgingResult<()> {
        let mut tables = self.tables.write().await;
        tables.places.remove(place_id);
        tables
            .bookings
            .retain(|_, booking| &booking.place_id != place_id);
        Ok(())
    }
}

impl BookingRepository for MemoryLodgingRepository {
    async fn create_booking(&self, booking: &Booking) -> LodgingResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.places.contains_key(&booking.place_id) {
            return Err(LodgingError::NotFound(Resource::Place));
        }
        tables.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn find_booking(&self, booking_id: &BookingId) -> LodgingResult<Option<Booking>> {
        Ok(self.tables.read().await.bookings.get(booking_id).cloned())
    }

    async fn list_bookings_by_booker(&self, booker: &UserId) -> LodgingResult<Vec<Booking>> {
        let bookings = self
            .tables
            .read()
            .await
            .bookings
            .values()
            .filter(|booking| &booking.booker == booker)
            .cloned()
            .collect();
        Ok(oldest_first(bookings, |booking: &Booking| booking.created_at))
    }

    async fn delete_booking(&self, booking_id: &BookingId) -> LodgingResult<()> {
        self.tables.write().await.bookings.remove(booking_id);
        Ok(())
    }
}
