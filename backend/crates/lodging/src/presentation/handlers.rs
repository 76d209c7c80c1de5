//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;

use auth::{Caller, RequireSession};
use kernel::id::PlaceId;

use crate::application::{BookingUseCase, PlaceUseCase};
use crate::domain::repository::{BookingRepository, PlaceRepository};
use crate::error::{LodgingError, LodgingResult};
use crate::presentation::dto::{
    BookingRequest, BookingResponse, DeleteRequest, PlaceRequest, PlaceResponse,
};

/// Shared state for lodging handlers
pub struct LodgingAppState<R> {
    pub repo: Arc<R>,
}

impl<R> Clone for LodgingAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Public Browsing
// ============================================================================

/// GET /places
pub async fn list_places<R>(
    State(state): State<LodgingAppState<R>>,
) -> LodgingResult<Json<Vec<PlaceResponse>>>
where
    R: PlaceRepository + BookingRepository + Send + Sync + 'static,
{
    let places = PlaceUseCase::new(state.repo.clone()).list_all().await?;
    Ok(Json(places.iter().map(PlaceResponse::from).collect()))
}

/// GET /places/{id}
pub async fn get_place<R>(
    State(state): State<LodgingAppState<R>>,
    Path(id): Path<String>,
) -> LodgingResult<Json<PlaceResponse>>
where
    R: PlaceRepository + BookingRepository + Send + Sync + 'static,
{
    let place_id: PlaceId = id.parse()?;
    let place = PlaceUseCase::new(state.repo.clone()).get(&place_id).await?;
    Ok(Json(PlaceResponse::from(&place)))
}

// ============================================================================
// Own Places
// ============================================================================

/// GET /user-places
pub async fn list_own_places<R>(
    State(state): State<LodgingAppState<R>>,
    caller: Caller,
) -> LodgingResult<Json<Vec<PlaceResponse>>>
where
    R: PlaceRepository + BookingRepository + Send + Sync + 'static,
{
    let places = PlaceUseCase::new(state.repo.clone())
        .list_own(&caller)
        .await?;
    Ok(Json(places.iter().map(PlaceResponse::from).collect()))
}

/// POST /user-places
pub async fn create_place<R>(
    State(state): State<LodgingAppState<R>>,
    session: RequireSession,
    Json(req): Json<PlaceRequest>,
) -> LodgingResult<Json<PlaceResponse>>
where
    R: PlaceRepository + BookingRepository + Send + Sync + 'static,
{
    let place = PlaceUseCase::new(state.repo.clone())
        .create(&session.caller(), req.into_details())
        .await?;
    Ok(Json(PlaceResponse::from(&place)))
}

/// PUT /user-places
pub async fn update_place<R>(
    State(state): State<LodgingAppState<R>>,
    session: RequireSession,
    Json(req): Json<PlaceRequest>,
) -> LodgingResult<Json<PlaceResponse>>
where
    R: PlaceRepository + BookingRepository + Send + Sync + 'static,
{
    let place_id: PlaceId = req
        .id
        .as_deref()
        .ok_or_else(|| LodgingError::invalid("Place id is required"))?
        .parse()?;

    let place = PlaceUseCase::new(state.repo.clone())
        .update(&session.caller(), &place_id, req.into_details())
        .await?;
    Ok(Json(PlaceResponse::from(&place)))
}

/// DELETE /user-places
pub async fn delete_place<R>(
    State(state): State<LodgingAppState<R>>,
    session: RequireSession,
    Json(req): Json<DeleteRequest>,
) -> LodgingResult<Json<&'static str>>
where
    R: PlaceRepository + BookingRepository + Send + Sync + 'static,
{
    PlaceUseCase::new(state.repo.clone())
        .delete(&session.caller(), &req.place_id()?)
        .await?;
    Ok(Json("Place deleted successfully"))
}

// ============================================================================
// Bookings
// ============================================================================

/// GET /bookings
pub async fn list_bookings<R>(
    State(state): State<LodgingAppState<R>>,
    caller: Caller,
) -> LodgingResult<Json<Vec<BookingResponse>>>
where
    R: PlaceRepository + BookingRepository + Send + Sync + 'static,
{
    let bookings = BookingUseCase::new(state.repo.clone())
        .list_own(&caller)
        .await?;
    Ok(Json(bookings.iter().map(BookingResponse::from).collect()))
}

/// POST /bookings
pub async fn create_booking<R>(
    State(state): State<LodgingAppState<R>>,
    session: RequireSession,
    Json(req): Json<BookingRequest>,
) -> LodgingResult<Json<BookingResponse>>
where
    R: PlaceRepository + BookingRepository + Send + Sync + 'static,
{
    let booking = BookingUseCase::new(state.repo.clone())
        .create(&session.caller(), req.into_details()?)
        .await?;
    Ok(Json(BookingResponse::from(&booking)))
}

/// DELETE /bookings
pub async fn delete_booking<R>(
    State(state): State<LodgingAppState<R>>,
    session: RequireSession,
    Json(req): Json<DeleteRequest>,
) -> LodgingResult<Json<&'static str>>
where
    R: PlaceRepository + BookingRepository + Send + Sync + 'static,
{
    BookingUseCase::new(state.repo.clone())
        .delete(&session.caller(), &req.booking_id()?)
        .await?;
    Ok(Json("Booking deleted successfully"))
}
