//! User facade.
//!
//! # Invariants
//! - Stored emails are normalized and unique across users.
//! - `places` changes only through the relation manager.

use super::{
    build_entity, build_new_entity, delete_entity, get_entity, list_entities, merged_record,
    persist_update, store_entity, FacadeError, FacadeResult,
};
use crate::model::user::{normalize_email, User, UserId};
use crate::model::{Entity, Record};
use crate::repo::Repository;
use log::warn;

/// Validate-then-persist wrapper for users.
pub struct UserFacade<R: Repository<User>> {
    user_repo: R,
}

impl<R: Repository<User>> UserFacade<R> {
    pub fn new(user_repo: R) -> Self {
        Self { user_repo }
    }

    /// Underlying repository, for cross-entity orchestration.
    pub fn repo(&self) -> &R {
        &self.user_repo
    }

    /// Creates one user from an input mapping.
    ///
    /// The new user owns no places; `places` in `data` is ignored.
    ///
    /// # Errors
    /// - `Validation` for malformed names/email or wrong field types.
    /// - `EmailTaken` when the normalized email is already registered.
    pub fn create_user(&self, data: Record) -> FacadeResult<Record> {
        let user: User = build_new_entity(data)?;
        self.ensure_email_free("create", &user.email, None)?;
        store_entity(&self.user_repo, &user)
    }

    pub fn get_user(&self, user_id: UserId) -> FacadeResult<Option<Record>> {
        get_entity::<User, _>(&self.user_repo, user_id)
    }

    /// Finds a user by email, compared in normalized form.
    ///
    /// Returns `None` for syntactically invalid input.
    pub fn get_user_by_email(&self, email: &str) -> FacadeResult<Option<Record>> {
        Ok(self.find_by_email(email)?.map(|user| user.to_dict()))
    }

    pub fn get_all_users(&self) -> FacadeResult<Vec<Record>> {
        list_entities::<User, _>(&self.user_repo)
    }

    /// Merges `fields` into user `user_id`, revalidates and persists.
    ///
    /// `places` is kept as stored.
    pub fn update_user(&self, user_id: UserId, fields: Record) -> FacadeResult<Record> {
        let merged = merged_record::<User, _>(&self.user_repo, user_id, fields)?;
        let user: User = build_entity("update", &merged)?;
        self.ensure_email_free("update", &user.email, Some(user_id))?;
        persist_update(&self.user_repo, user_id, &user)
    }

    pub fn delete_user(&self, user_id: UserId) -> FacadeResult<()> {
        delete_entity::<User, _>(&self.user_repo, user_id)
    }

    fn find_by_email(&self, email: &str) -> FacadeResult<Option<User>> {
        let Ok(normalized) = normalize_email(email) else {
            return Ok(None);
        };
        Ok(self
            .user_repo
            .list()?
            .into_iter()
            .find(|user| user.email == normalized))
    }

    fn ensure_email_free(
        &self,
        action: &str,
        email: &str,
        owner: Option<UserId>,
    ) -> FacadeResult<()> {
        match self.find_by_email(email)? {
            Some(existing) if Some(existing.id) != owner => {
                warn!(
                    "event=entity_{action} module=facade status=error entity=user error_code=email_taken"
                );
                Err(FacadeError::EmailTaken(email.to_string()))
            }
            _ => Ok(()),
        }
    }
}
