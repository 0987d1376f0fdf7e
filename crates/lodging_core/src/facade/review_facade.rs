//! Review facade.

use super::{create_entity, delete_entity, get_entity, list_entities, update_entity, FacadeResult};
use crate::model::review::{Review, ReviewId};
use crate::model::Record;
use crate::repo::Repository;

/// Validate-then-persist wrapper for reviews.
///
/// Referenced place/user existence is checked by
/// `FacadeRelationManager::create_review_for_place`, not here.
pub struct ReviewFacade<R: Repository<Review>> {
    review_repo: R,
}

impl<R: Repository<Review>> ReviewFacade<R> {
    pub fn new(review_repo: R) -> Self {
        Self { review_repo }
    }

    pub fn repo(&self) -> &R {
        &self.review_repo
    }

    pub fn create_review(&self, data: Record) -> FacadeResult<Record> {
        create_entity::<Review, _>(&self.review_repo, data)
    }

    pub fn get_review(&self, review_id: ReviewId) -> FacadeResult<Option<Record>> {
        get_entity::<Review, _>(&self.review_repo, review_id)
    }

    pub fn get_all_reviews(&self) -> FacadeResult<Vec<Record>> {
        list_entities::<Review, _>(&self.review_repo)
    }

    /// Merges `fields` into the review. `place_id` and `user_id` are kept.
    pub fn update_review(&self, review_id: ReviewId, fields: Record) -> FacadeResult<Record> {
        update_entity::<Review, _>(&self.review_repo, review_id, fields)
    }

    pub fn delete_review(&self, review_id: ReviewId) -> FacadeResult<()> {
        delete_entity::<Review, _>(&self.review_repo, review_id)
    }
}
