//! Lodging Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::repository::{BookingRepository, PlaceRepository};
use crate::infra::postgres::PgLodgingRepository;
use crate::presentation::handlers::{self, LodgingAppState};

/// Create the Lodging router with PostgreSQL repository
pub fn lodging_router(repo: PgLodgingRepository) -> Router {
    lodging_router_generic(Arc::new(repo))
}

/// Create a generic Lodging router for any repository implementation
///
/// Owner-scoped routes need the caller from `auth::with_session`.
pub fn lodging_router_generic<R>(repo: Arc<R>) -> Router
where
    R: PlaceRepository + BookingRepository + Send + Sync + 'static,
{
    let state = LodgingAppState { repo };

    Router::new()
        .route("/places", get(handlers::list_places::<R>))
        .route("/places/{id}", get(handlers::get_place::<R>))
        .route(
            "/user-places",
            get(handlers::list_own_places::<R>)
                .post(handlers::create_place::<R>)
                .put(handlers::update_place::<R>)
                .delete(handlers::delete_place::<R>),
        )
        .route(
            "/bookings",
            get(handlers::list_bookings::<R>)
                .post(handlers::create_booking::<R>)
                .delete(handlers::delete_booking::<R>),
        )
        .with_state(state)
}
