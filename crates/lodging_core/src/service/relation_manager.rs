//! Cross-entity operations composed over the four facades.
//!
//! # Responsibility
//! - Check that referenced users/places exist before dependent writes.
//! - Propagate denormalized fields (`owner_first_name`) and maintain
//!   back-reference lists (`User::places`, `Place::amenities`,
//!   `Place::reviews`).
//!
//! # Invariants
//! - Every operation is fail-fast: the first unmet precondition aborts it.
//! - There are no transactions. Writes committed by earlier steps are not
//!   rolled back, so a failed back-reference update leaves an orphan record
//!   whose own foreign key is still correct.
//! - Back-reference lists are overwritten whole (read, append, write). Two
//!   concurrent callers on the same user/place race with last-writer-wins.
//! - Operations are not idempotent: repeating `create_place_for_user`
//!   creates another place and appends another id.

use crate::facade::amenity_facade::AmenityFacade;
use crate::facade::place_facade::PlaceFacade;
use crate::facade::review_facade::ReviewFacade;
use crate::facade::user_facade::UserFacade;
use crate::facade::FacadeError;
use crate::model::amenity::Amenity;
use crate::model::place::{Place, PlaceId};
use crate::model::review::Review;
use crate::model::user::{User, UserId};
use crate::model::{Entity, Record};
use crate::repo::{RepoError, Repository};
use log::{debug, error, info};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Failure of a relation-manager operation.
///
/// Display strings of the not-found variants are part of the public contract
/// and always contain the literal id.
#[derive(Debug)]
pub enum RelationError {
    /// Owner/author lookup failed for a write.
    UserNotFound(UserId),
    /// Owner lookup failed while listing places.
    PlaceListOwnerNotFound(UserId),
    /// User exists but owns no place ids.
    NoPlacesForUser(UserId),
    PlaceNotFound(PlaceId),
    Facade(FacadeError),
    Repo(RepoError),
    /// A facade result lacked a field the operation depends on.
    InconsistentState(&'static str),
}

impl Display for RelationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserNotFound(id) => write!(f, "User with id {id} not found."),
            Self::PlaceListOwnerNotFound(id) => write!(f, "User with id: {id} not found"),
            Self::NoPlacesForUser(id) => write!(f, "No place found for this user: {id}"),
            Self::PlaceNotFound(id) => write!(f, "Place: {id} not found."),
            Self::Facade(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for RelationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Facade(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FacadeError> for RelationError {
    fn from(value: FacadeError) -> Self {
        Self::Facade(value)
    }
}

impl From<RepoError> for RelationError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type RelationResult<T> = Result<T, RelationError>;

/// Orchestrates operations that touch more than one entity type.
///
/// Owns exactly one facade per entity type, injected at construction.
pub struct FacadeRelationManager<U, P, A, R>
where
    U: Repository<User>,
    P: Repository<Place>,
    A: Repository<Amenity>,
    R: Repository<Review>,
{
    user_facade: UserFacade<U>,
    place_facade: PlaceFacade<P>,
    amenity_facade: AmenityFacade<A>,
    review_facade: ReviewFacade<R>,
}

impl<U, P, A, R> FacadeRelationManager<U, P, A, R>
where
    U: Repository<User>,
    P: Repository<Place>,
    A: Repository<Amenity>,
    R: Repository<Review>,
{
    pub fn new(
        user_facade: UserFacade<U>,
        place_facade: PlaceFacade<P>,
        amenity_facade: AmenityFacade<A>,
        review_facade: ReviewFacade<R>,
    ) -> Self {
        Self {
            user_facade,
            place_facade,
            amenity_facade,
            review_facade,
        }
    }

    pub fn user_facade(&self) -> &UserFacade<U> {
        &self.user_facade
    }

    pub fn place_facade(&self) -> &PlaceFacade<P> {
        &self.place_facade
    }

    pub fn amenity_facade(&self) -> &AmenityFacade<A> {
        &self.amenity_facade
    }

    pub fn review_facade(&self) -> &ReviewFacade<R> {
        &self.review_facade
    }

    /// Creates a place owned by `user_id` and records it on the owner.
    ///
    /// # Contract
    /// - `owner_id`, `owner_first_name`, `amenities` and `reviews` in
    ///   `place_data` are overwritten, not merged.
    /// - The place is created before the owner is updated; the owner is
    ///   updated exactly once with the new id appended.
    /// - Returns the place facade's creation result unchanged.
    ///
    /// # Errors
    /// - `UserNotFound` before any write when the owner does not exist.
    /// - Facade validation errors before any write.
    /// - Repository errors from the owner update, after the place exists.
    pub fn create_place_for_user(
        &self,
        user_id: UserId,
        place_data: Record,
    ) -> RelationResult<Record> {
        let mut user = self
            .user_facade
            .repo()
            .get(user_id)?
            .ok_or(RelationError::UserNotFound(user_id))?;

        let mut payload = place_data;
        payload.insert("owner_id".to_string(), Value::String(user_id.to_string()));
        payload.insert("amenities".to_string(), Value::Array(Vec::new()));
        payload.insert("reviews".to_string(), Value::Array(Vec::new()));
        payload.insert(
            "owner_first_name".to_string(),
            Value::String(user.first_name.clone()),
        );

        let created = self.place_facade.create_place(payload)?;
        let place_id = record_id(&created)
            .ok_or(RelationError::InconsistentState("created place has no id"))?;

        user.add_place(place_id);
        if let Err(err) = self.user_facade.repo().update(user_id, &user) {
            error!(
                "event=place_create_for_user module=relation status=error error_code=owner_update_failed user_id={user_id} orphan_place_id={place_id} error={err}"
            );
            return Err(err.into());
        }

        info!(
            "event=place_create_for_user module=relation status=ok user_id={user_id} place_id={place_id}"
        );
        Ok(created)
    }

    /// Resolves the user's stored place ids to place snapshots.
    ///
    /// Keeps the stored order. Ids that no longer resolve are skipped.
    ///
    /// # Errors
    /// - `PlaceListOwnerNotFound` when the user does not exist.
    /// - `NoPlacesForUser` when the stored list is empty.
    pub fn get_all_places_dict_from_user_place_id_list(
        &self,
        user_id: UserId,
    ) -> RelationResult<Vec<Record>> {
        let user = self
            .user_facade
            .repo()
            .get(user_id)?
            .ok_or(RelationError::PlaceListOwnerNotFound(user_id))?;

        if user.places.is_empty() {
            return Err(RelationError::NoPlacesForUser(user_id));
        }

        let mut places = Vec::with_capacity(user.places.len());
        for place_id in &user.places {
            match self.place_facade.repo().get(*place_id)? {
                Some(place) => places.push(place.to_dict()),
                None => debug!(
                    "event=user_places_list module=relation status=skip user_id={user_id} stale_place_id={place_id}"
                ),
            }
        }
        Ok(places)
    }

    /// Creates an amenity and appends its name to the place.
    ///
    /// # Contract
    /// - The place is looked up first; amenity creation never runs for a
    ///   missing place.
    /// - The place is updated exactly once.
    /// - Returns the amenity facade's creation result unchanged.
    pub fn add_amenity_to_a_place(
        &self,
        place_id: PlaceId,
        amenity_data: Record,
    ) -> RelationResult<Record> {
        let mut place = self.require_place(place_id)?;

        let created = self.amenity_facade.create_amenity(amenity_data)?;
        let name = created
            .get("name")
            .and_then(Value::as_str)
            .ok_or(RelationError::InconsistentState("created amenity has no name"))?;

        place.add_amenity(name);
        if let Err(err) = self.place_facade.repo().update(place_id, &place) {
            error!(
                "event=amenity_attach module=relation status=error error_code=place_update_failed place_id={place_id} orphan_amenity_id={} error={err}",
                record_id(&created).map(|id| id.to_string()).unwrap_or_default()
            );
            return Err(err.into());
        }

        info!("event=amenity_attach module=relation status=ok place_id={place_id}");
        Ok(created)
    }

    /// Creates a review of `place_id` written by `user_id`.
    ///
    /// `user_id` and `place_id` in `review_data` are overwritten. The review
    /// id is appended to the place, which is updated exactly once.
    ///
    /// # Errors
    /// - `UserNotFound` / `PlaceNotFound` before any write.
    pub fn create_review_for_place(
        &self,
        user_id: UserId,
        place_id: PlaceId,
        review_data: Record,
    ) -> RelationResult<Record> {
        if self.user_facade.repo().get(user_id)?.is_none() {
            return Err(RelationError::UserNotFound(user_id));
        }
        let mut place = self.require_place(place_id)?;

        let mut payload = review_data;
        payload.insert("user_id".to_string(), Value::String(user_id.to_string()));
        payload.insert("place_id".to_string(), Value::String(place_id.to_string()));

        let created = self.review_facade.create_review(payload)?;
        let review_id = record_id(&created)
            .ok_or(RelationError::InconsistentState("created review has no id"))?;

        place.add_review(review_id);
        if let Err(err) = self.place_facade.repo().update(place_id, &place) {
            error!(
                "event=review_create_for_place module=relation status=error error_code=place_update_failed place_id={place_id} orphan_review_id={review_id} error={err}"
            );
            return Err(err.into());
        }

        info!(
            "event=review_create_for_place module=relation status=ok place_id={place_id} review_id={review_id}"
        );
        Ok(created)
    }

    /// Resolves the place's stored review ids, skipping stale ones.
    pub fn get_reviews_for_place(&self, place_id: PlaceId) -> RelationResult<Vec<Record>> {
        let place = self.require_place(place_id)?;

        let mut reviews = Vec::with_capacity(place.reviews.len());
        for review_id in &place.reviews {
            if let Some(review) = self.review_facade.repo().get(*review_id)? {
                reviews.push(review.to_dict());
            }
        }
        Ok(reviews)
    }

    fn require_place(&self, place_id: PlaceId) -> RelationResult<Place> {
        self.place_facade
            .repo()
            .get(place_id)?
            .ok_or(RelationError::PlaceNotFound(place_id))
    }
}

fn record_id(record: &Record) -> Option<Uuid> {
    record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|text| Uuid::parse_str(text).ok())
}

#[cfg(test)]
mod tests {
    use super::{record_id, RelationError};
    use crate::model::Record;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn not_found_messages_carry_literal_ids() {
        let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        assert_eq!(
            RelationError::UserNotFound(id).to_string(),
            format!("User with id {id} not found.")
        );
        assert_eq!(
            RelationError::PlaceListOwnerNotFound(id).to_string(),
            format!("User with id: {id} not found")
        );
        assert_eq!(
            RelationError::NoPlacesForUser(id).to_string(),
            format!("No place found for this user: {id}")
        );
        assert_eq!(
            RelationError::PlaceNotFound(id).to_string(),
            format!("Place: {id} not found.")
        );
    }

    #[test]
    fn record_id_requires_uuid_text() {
        let id = Uuid::new_v4();
        let mut record = Record::new();
        record.insert("id".to_string(), json!(id.to_string()));
        assert_eq!(record_id(&record), Some(id));

        record.insert("id".to_string(), json!("place-456"));
        assert_eq!(record_id(&record), None);

        record.insert("id".to_string(), json!(7));
        assert_eq!(record_id(&record), None);
    }
}
