//! Domain Entities
//!
//! Places offered by hosts and bookings made by guests. Both record the
//! account that owns them; ownership is checked by `auth::OwnershipGuard`.

use auth::Owned;
use chrono::{DateTime, Utc};
use kernel::id::{BookingId, PlaceId, UserId};

use crate::domain::value_objects::StayDates;
use crate::error::{LodgingError, LodgingResult};

/// Maximum length of a place title (in characters)
pub const TITLE_MAX_LENGTH: usize = 200;

// ============================================================================
// Place
// ============================================================================

/// Editable fields of a place
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaceDetails {
    pub title: String,
    pub address: String,
    pub photos: Vec<String>,
    pub description: String,
    pub types: Vec<String>,
    pub perks: Vec<String>,
    pub extra_info: String,
    /// Check-in time as shown to guests (e.g. "14:00")
    pub check_in: String,
    pub check_out: String,
    pub max_guests: i32,
    /// Price per night in whole currency units
    pub price: i64,
}

impl PlaceDetails {
    /// Trim free text and check field bounds
    pub fn validated(mut self) -> LodgingResult<Self> {
        self.title = self.title.trim().to_string();
        self.address = self.address.trim().to_string();

        if self.title.is_empty() {
            return Err(LodgingError::invalid("Title cannot be empty"));
        }
        if self.title.chars().count() > TITLE_MAX_LENGTH {
            return Err(LodgingError::invalid(format!(
                "Title must be at most {} characters",
                TITLE_MAX_LENGTH
            )));
        }
        if self.max_guests < 1 {
            return Err(LodgingError::invalid("A place must admit at least one guest"));
        }
        if self.price < 0 {
            return Err(LodgingError::invalid("Price cannot be negative"));
        }

        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub id: PlaceId,
    /// Account that listed the place
    pub owner: UserId,
    pub details: PlaceDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    /// `details` must already be validated
    pub fn new(owner: UserId, details: PlaceDetails) -> Self {
        let now = Utc::now();
        Self {
            id: PlaceId::new(),
            owner,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field; the owner never changes
    pub fn apply(&mut self, details: PlaceDetails) {
        self.details = details;
        self.updated_at = Utc::now();
    }
}

impl Owned for Place {
    fn owner_id(&self) -> UserId {
        self.owner
    }
}

// ============================================================================
// Booking
// ============================================================================

/// Fields a guest supplies when booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub place_id: PlaceId,
    pub stay: StayDates,
    pub guests: i32,
    /// Quoted total in whole currency units
    pub total: i64,
}

impl BookingDetails {
    /// Check the booking against the place being booked
    pub fn validate_for(&self, place: &Place) -> LodgingResult<()> {
        if self.guests < 1 {
            return Err(LodgingError::invalid("A booking needs at least one guest"));
        }
        if self.guests > place.details.max_guests {
            return Err(LodgingError::invalid(format!(
                "This place admits at most {} guests",
                place.details.max_guests
            )));
        }
        if self.total < 0 {
            return Err(LodgingError::invalid("Total cannot be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    /// Account that made the booking
    pub booker: UserId,
    pub place_id: PlaceId,
    pub stay: StayDates,
    pub guests: i32,
    pub total: i64,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(booker: UserId, details: BookingDetails) -> Self {
        Self {
            id: BookingId::new(),
            booker,
            place_id: details.place_id,
            stay: details.stay,
            guests: details.guests,
            total: details.total,
            created_at: Utc::now(),
        }
    }
}

impl Owned for Booking {
    fn owner_id(&self) -> UserId {
        self.booker
    }
}
