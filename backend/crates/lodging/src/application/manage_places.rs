//! Place Use Cases
//!
//! Browsing is public; the caller's own list and every write go through
//! the ownership guard.

use std::sync::Arc;

use auth::{Action, Caller, OwnershipGuard};
use kernel::id::PlaceId;

use crate::domain::entities::{Place, PlaceDetails};
use crate::domain::repository::PlaceRepository;
use crate::error::{LodgingError, LodgingResult, Resource};

pub struct PlaceUseCase<R>
where
    R: PlaceRepository,
{
    repo: Arc<R>,
}

impl<R> PlaceUseCase<R>
where
    R: PlaceRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> LodgingResult<Vec<Place>> {
        self.repo.list_places().await
    }

    pub async fn get(&self, place_id: &PlaceId) -> LodgingResult<Place> {
        self.repo
            .find_place(place_id)
            .await?
            .ok_or(LodgingError::NotFound(Resource::Place))
    }

    pub async fn list_own(&self, caller: &Caller) -> LodgingResult<Vec<Place>> {
        let identity = OwnershipGuard::authenticated(caller, Action::ReadOwnList).map_err(
            |denial| LodgingError::denied(denial, Action::ReadOwnList, Resource::Place),
        )?;

        self.repo.list_places_by_owner(&identity.id).await
    }

    pub async fn create(&self, caller: &Caller, details: PlaceDetails) -> LodgingResult<Place> {
        let identity = OwnershipGuard::authenticated(caller, Action::Create)
            .map_err(|denial| LodgingError::denied(denial, Action::Create, Resource::Place))?;

        let place = Place::new(identity.id, details.validated()?);
        self.repo.create_place(&place).await?;

        tracing::info!(place_id = %place.id, owner = %place.owner, "Place created");

        Ok(place)
    }

    pub async fn update(
        &self,
        caller: &Caller,
        place_id: &PlaceId,
        details: PlaceDetails,
    ) -> LodgingResult<Place> {
        let mut place = self.authorized(caller, Action::Update, place_id).await?;

        place.apply(details.validated()?);
        self.repo.save_place(&place).await?;

        tracing::info!(place_id = %place.id, "Place updated");

        Ok(place)
    }

    pub async fn delete(&self, caller: &Caller, place_id: &PlaceId) -> LodgingResult<()> {
        let place = self.authorized(caller, Action::Delete, place_id).await?;

        self.repo.delete_place(&place.id).await?;

        tracing::info!(place_id = %place.id, "Place deleted");

        Ok(())
    }

    async fn authorized(
        &self,
        caller: &Caller,
        action: Action,
        place_id: &PlaceId,
    ) -> LodgingResult<Place> {
        OwnershipGuard::fetch_authorized(caller, action, || self.repo.find_place(place_id))
            .await?
            .map_err(|denial| LodgingError::denied(denial, action, Resource::Place))
    }
}
