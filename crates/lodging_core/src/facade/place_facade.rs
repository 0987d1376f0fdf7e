//! Place facade.

use super::{create_entity, delete_entity, get_entity, list_entities, update_entity, FacadeResult};
use crate::model::place::{Place, PlaceId};
use crate::model::Record;
use crate::repo::Repository;

/// Validate-then-persist wrapper for places.
///
/// Does not check that `owner_id` exists; use
/// `FacadeRelationManager::create_place_for_user` for owned creation.
pub struct PlaceFacade<R: Repository<Place>> {
    place_repo: R,
}

impl<R: Repository<Place>> PlaceFacade<R> {
    pub fn new(place_repo: R) -> Self {
        Self { place_repo }
    }

    /// Underlying repository, for cross-entity orchestration.
    pub fn repo(&self) -> &R {
        &self.place_repo
    }

    pub fn create_place(&self, data: Record) -> FacadeResult<Record> {
        create_entity::<Place, _>(&self.place_repo, data)
    }

    pub fn get_place(&self, place_id: PlaceId) -> FacadeResult<Option<Record>> {
        get_entity::<Place, _>(&self.place_repo, place_id)
    }

    pub fn get_all_places(&self) -> FacadeResult<Vec<Record>> {
        list_entities::<Place, _>(&self.place_repo)
    }

    /// Merges `fields` into the place. `owner_id`, `owner_first_name`,
    /// `amenities` and `reviews` are kept as stored.
    pub fn update_place(&self, place_id: PlaceId, fields: Record) -> FacadeResult<Record> {
        update_entity::<Place, _>(&self.place_repo, place_id, fields)
    }

    pub fn delete_place(&self, place_id: PlaceId) -> FacadeResult<()> {
        delete_entity::<Place, _>(&self.place_repo, place_id)
    }
}
