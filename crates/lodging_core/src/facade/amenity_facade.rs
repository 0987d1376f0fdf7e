//! Amenity facade.

use super::{create_entity, delete_entity, get_entity, list_entities, update_entity, FacadeResult};
use crate::model::amenity::{Amenity, AmenityId};
use crate::model::Record;
use crate::repo::Repository;

/// Validate-then-persist wrapper for amenities.
pub struct AmenityFacade<R: Repository<Amenity>> {
    amenity_repo: R,
}

impl<R: Repository<Amenity>> AmenityFacade<R> {
    pub fn new(amenity_repo: R) -> Self {
        Self { amenity_repo }
    }

    pub fn repo(&self) -> &R {
        &self.amenity_repo
    }

    pub fn create_amenity(&self, data: Record) -> FacadeResult<Record> {
        create_entity::<Amenity, _>(&self.amenity_repo, data)
    }

    pub fn get_amenity(&self, amenity_id: AmenityId) -> FacadeResult<Option<Record>> {
        get_entity::<Amenity, _>(&self.amenity_repo, amenity_id)
    }

    pub fn get_all_amenities(&self) -> FacadeResult<Vec<Record>> {
        list_entities::<Amenity, _>(&self.amenity_repo)
    }

    pub fn update_amenity(&self, amenity_id: AmenityId, fields: Record) -> FacadeResult<Record> {
        update_entity::<Amenity, _>(&self.amenity_repo, amenity_id, fields)
    }

    pub fn delete_amenity(&self, amenity_id: AmenityId) -> FacadeResult<()> {
        delete_entity::<Amenity, _>(&self.amenity_repo, amenity_id)
    }
}
