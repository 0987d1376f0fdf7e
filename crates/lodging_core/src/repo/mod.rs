//! Repository contracts and SQLite persistence.
//!
//! # Responsibility
//! - Define the keyed get/create/update/delete/list contract per entity.
//! - Isolate SQL details from facades and the relation manager.
//!
//! # Invariants
//! - `get` reports a missing id as `Ok(None)`, never as an error.
//! - `update` and `delete` report a missing id as `RepoError::NotFound`.
//! - Read paths reject undecodable or invalid persisted rows.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod amenity_repo;
pub mod place_repo;
pub mod review_repo;
pub mod sqlite_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure shared by all entity repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { entity: &'static str, id: Uuid },
    /// Connection schema is not at the version this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Keyed store for one entity type.
pub trait Repository<T> {
    /// Loads one entity, `None` when absent.
    fn get(&self, id: Uuid) -> RepoResult<Option<T>>;
    /// Inserts one entity and returns the persisted read-back.
    fn create(&self, entity: &T) -> RepoResult<T>;
    /// Replaces all mutable fields of the stored entity `id`.
    fn update(&self, id: Uuid, entity: &T) -> RepoResult<()>;
    /// Removes one entity.
    fn delete(&self, id: Uuid) -> RepoResult<()>;
    /// Lists all entities, oldest first.
    fn list(&self) -> RepoResult<Vec<T>>;
}

impl<T, R: Repository<T> + ?Sized> Repository<T> for &R {
    fn get(&self, id: Uuid) -> RepoResult<Option<T>> {
        (**self).get(id)
    }

    fn create(&self, entity: &T) -> RepoResult<T> {
        (**self).create(entity)
    }

    fn update(&self, id: Uuid, entity: &T) -> RepoResult<()> {
        (**self).update(id, entity)
    }

    fn delete(&self, id: Uuid) -> RepoResult<()> {
        (**self).delete(id)
    }

    fn list(&self) -> RepoResult<Vec<T>> {
        (**self).list()
    }
}
