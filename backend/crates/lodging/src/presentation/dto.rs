//! API DTOs (Data Transfer Objects)

use chrono::NaiveDate;
use kernel::id::{BookingId, PlaceId};
use serde::{Deserialize, Serialize};

use crate::application::BookingWithPlace;
use crate::domain::entities::{Booking, BookingDetails, Place, PlaceDetails};
use crate::domain::value_objects::StayDates;
use crate::error::LodgingResult;

// ============================================================================
// Places
// ============================================================================

/// Body of POST/PUT /user-places
///
/// `id` is required for PUT and ignored for POST.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, alias = "photos")]
    pub added_photos: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default)]
    pub extra_info: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    pub max_guests: i32,
    pub price: i64,
}

impl PlaceRequest {
    pub fn into_details(self) -> PlaceDetails {
        PlaceDetails {
            title: self.title,
            address: self.address,
            photos: self.added_photos,
            description: self.description,
            types: self.types,
            perks: self.perks,
            extra_info: self.extra_info,
            check_in: self.check_in,
            check_out: self.check_out,
            max_guests: self.max_guests,
            price: self.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResponse {
    pub id: String,
    pub owner: String,
    pub title: String,
    pub address: String,
    pub photos: Vec<String>,
    pub description: String,
    pub types: Vec<String>,
    pub perks: Vec<String>,
    pub extra_info: String,
    pub check_in: String,
    pub check_out: String,
    pub max_guests: i32,
    pub price: i64,
}

impl From<&Place> for PlaceResponse {
    fn from(place: &Place) -> Self {
        let details = &place.details;
        Self {
            id: place.id.to_string(),
            owner: place.owner.to_string(),
            title: details.title.clone(),
            address: details.address.clone(),
            photos: details.photos.clone(),
            description: details.description.clone(),
            types: details.types.clone(),
            perks: details.perks.clone(),
            extra_info: details.extra_info.clone(),
            check_in: details.check_in.clone(),
            check_out: details.check_out.clone(),
            max_guests: details.max_guests,
            price: details.price,
        }
    }
}

// ============================================================================
// Bookings
// ============================================================================

/// Body of POST /bookings
///
/// Any booker field in the body is ignored; the booker is the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub place: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: i32,
    pub total: i64,
}

impl BookingRequest {
    pub fn into_details(self) -> LodgingResult<BookingDetails> {
        Ok(BookingDetails {
            place_id: self.place.parse::<PlaceId>()?,
            stay: StayDates::new(self.check_in_date, self.check_out_date)?,
            guests: self.guests,
            total: self.total,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub booker: String,
    pub place: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: i64,
    pub guests: i32,
    pub total: i64,
    /// Present in listings; `None` if the place is gone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_details: Option<PlaceResponse>,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            booker: booking.booker.to_string(),
            place: booking.place_id.to_string(),
            check_in_date: booking.stay.check_in(),
            check_out_date: booking.stay.check_out(),
            nights: booking.stay.nights(),
            guests: booking.guests,
            total: booking.total,
            place_details: None,
        }
    }
}

impl From<&BookingWithPlace> for BookingResponse {
    fn from(view: &BookingWithPlace) -> Self {
        Self {
            place_details: view.place.as_ref().map(PlaceResponse::from),
            ..Self::from(&view.booking)
        }
    }
}

// ============================================================================
// Deletion
// ============================================================================

/// Body of DELETE /user-places and DELETE /bookings
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

impl DeleteRequest {
    pub fn place_id(&self) -> LodgingResult<PlaceId> {
        Ok(self.id.parse()?)
    }

    pub fn booking_id(&self) -> LodgingResult<BookingId> {
        Ok(self.id.parse()?)
    }
}
