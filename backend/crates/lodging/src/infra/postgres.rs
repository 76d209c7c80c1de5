//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{BookingId, PlaceId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Booking, Place, PlaceDetails};
use crate::domain::repository::{BookingRepository, PlaceRepository};
use crate::domain::value_objects::StayDates;
use crate::error::{LodgingError, LodgingResult, Resource};

/// PostgreSQL-backed lodging store
///
/// `bookings.place_id` references `places` with `ON DELETE CASCADE`.
#[derive(Clone)]
pub struct PgLodgingRepository {
    pool: PgPool,
}

impl PgLodgingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raised when the booked place was deleted concurrently
const BOOKINGS_PLACE_FKEY: &str = "bookings_place_id_fkey";

const PLACE_COLUMNS: &str = r#"
    place_id, owner_id, title, address, photos, description, types, perks,
    extra_info, check_in, check_out, max_guests, price, created_at, updated_at
"#;

const BOOKING_COLUMNS: &str = r#"
    booking_id, booker_id, place_id, check_in_date, check_out_date, guests,
    total, created_at
"#;

// ============================================================================
// Place Repository Implementation
// ============================================================================

impl PlaceRepository for PgLodgingRepository {
    async fn create_place(&self, place: &Place) -> LodgingResult<()> {
        let details = &place.details;

        sqlx::query(
            r#"
            INSERT INTO places (
                place_id,
                owner_id,
                title,
                address,
                photos,
                description,
                types,
                perks,
                extra_info,
                check_in,
                check_out,
                max_guests,
                price,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(place.id.as_uuid())
        .bind(place.owner.as_uuid())
        .bind(&details.title)
        .bind(&details.address)
        .bind(&details.photos)
        .bind(&details.description)
        .bind(&details.types)
        .bind(&details.perks)
        .bind(&details.extra_info)
        .bind(&details.check_in)
        .bind(&details.check_out)
        .bind(details.max_guests)
        .bind(details.price)
        .bind(place.created_at)
        .bind(place.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_place(&self, place_id: &PlaceId) -> LodgingResult<Option<Place>> {
        let row = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places WHERE place_id = $1"
        ))
        .bind(place_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PlaceRow::into_place))
    }

    async fn list_places(&self) -> LodgingResult<Vec<Place>> {
        let rows = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PlaceRow::into_place).collect())
    }

    async fn list_places_by_owner(&self, owner: &UserId) -> LodgingResult<Vec<Place>> {
        let rows = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places WHERE owner_id = $1 ORDER BY created_at"
        ))
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PlaceRow::into_place).collect())
    }

    async fn save_place(&self, place: &Place) -> LodgingResult<()> {
        let details = &place.details;

        let result = sqlx::query(
            r#"
            UPDATE places
            SET title = $2,
                address = $3,
                photos = $4,
                description = $5,
                types = $6,
                perks = $7,
                extra_info = $8,
                check_in = $9,
                check_out = $10,
                max_guests = $11,
                price = $12,
                updated_at = $13
            WHERE place_id = $1
            "#,
        )
        .bind(place.id.as_uuid())
        .bind(&details.title)
        .bind(&details.address)
        .bind(&details.photos)
        .bind(&details.description)
        .bind(&details.types)
        .bind(&details.perks)
        .bind(&details.extra_info)
        .bind(&details.check_in)
        .bind(&details.check_out)
        .bind(details.max_guests)
        .bind(details.price)
        .bind(place.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LodgingError::NotFound(Resource::Place));
        }

        Ok(())
    }

    async fn delete_place(&self, place_id: &PlaceId) -> LodgingResult<()> {
        sqlx::query("DELETE FROM places WHERE place_id = $1")
            .bind(place_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Booking Repository Implementation
// ============================================================================

impl BookingRepository for PgLodgingRepository {
    async fn create_booking(&self, booking: &Booking) -> LodgingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                booking_id,
                booker_id,
                place_id,
                check_in_date,
                check_out_date,
                guests,
                total,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.booker.as_uuid())
        .bind(booking.place_id.as_uuid())
        .bind(booking.stay.check_in())
        .bind(booking.stay.check_out())
        .bind(booking.guests)
        .bind(booking.total)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err)
                if db_err.constraint() == Some(BOOKINGS_PLACE_FKEY) =>
            {
                LodgingError::NotFound(Resource::Place)
            }
            _ => LodgingError::Database(err),
        })?;

        Ok(())
    }

    async fn find_booking(&self, booking_id: &BookingId) -> LodgingResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_id = $1"
        ))
        .bind(booking_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookingRow::into_booking).transpose()
    }

    async fn list_bookings_by_booker(&self, booker: &UserId) -> LodgingResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE booker_id = $1 ORDER BY created_at"
        ))
        .bind(booker.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn delete_booking(&self, booking_id: &BookingId) -> LodgingResult<()> {
        sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(booking_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PlaceRow {
    place_id: Uuid,
    owner_id: Uuid,
    title: String,
    address: String,
    photos: Vec<String>,
    description: String,
    types: Vec<String>,
    perks: Vec<String>,
    extra_info: String,
    check_in: String,
    check_out: String,
    max_guests: i32,
    price: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PlaceRow {
    fn into_place(self) -> Place {
        Place {
            id: PlaceId::from_uuid(self.place_id),
            owner: UserId::from_uuid(self.owner_id),
            details: PlaceDetails {
                title: self.title,
                address: self.address,
                photos: self.photos,
                description: self.description,
                types: self.types,
                perks: self.perks,
                extra_info: self.extra_info,
                check_in: self.check_in,
                check_out: self.check_out,
                max_guests: self.max_guests,
                price: self.price,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    booking_id: Uuid,
    booker_id: Uuid,
    place_id: Uuid,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    guests: i32,
    total: i64,
    created_at: DateTime<Utc>,
}

impl BookingRow {
    fn into_booking(self) -> LodgingResult<Booking> {
        let stay = StayDates::new(self.check_in_date, self.check_out_date)
            .map_err(|e| LodgingError::Internal(format!("Invalid stored stay: {}", e)))?;

        Ok(Booking {
            id: BookingId::from_uuid(self.booking_id),
            booker: UserId::from_uuid(self.booker_id),
            place_id: PlaceId::from_uuid(self.place_id),
            stay,
            guests: self.guests,
            total: self.total,
            created_at: self.created_at,
        })
    }
}
