//! Per-entity facades: validate, then persist.
//!
//! # Responsibility
//! - Turn input mappings into validated entities before any write.
//! - Return stored representations as `Record` snapshots.
//!
//! # Invariants
//! - Invalid input never reaches the repository.
//! - Ids and timestamps are assigned here, never taken from input.
//! - Back-reference lists start empty and reference fields are fixed at
//!   creation; callers cannot rewrite either through a facade.
//! - A facade knows exactly one entity type; cross-entity rules live in
//!   `service::relation_manager`.

use crate::model::validation::ValidationError;
use crate::model::{Entity, Record};
use crate::repo::{RepoError, Repository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod amenity_facade;
pub mod place_facade;
pub mod review_facade;
pub mod user_facade;

/// Identity and timestamp keys ignored in caller input.
const PROTECTED_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

pub type FacadeResult<T> = Result<T, FacadeError>;

/// Facade-level failure.
#[derive(Debug)]
pub enum FacadeError {
    /// Input did not pass entity validation; nothing was persisted.
    Validation {
        entity: &'static str,
        source: ValidationError,
    },
    /// Target entity does not exist.
    NotFound { entity: &'static str, id: Uuid },
    /// Another user already registered this normalized email.
    EmailTaken(String),
    Repo(RepoError),
    /// Write succeeded but the read-back disagrees.
    InconsistentState(&'static str),
}

impl Display for FacadeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { entity, source } => write!(f, "invalid {entity}: {source}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::EmailTaken(email) => write!(f, "email already registered: {email}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for FacadeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FacadeError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Repo(other),
        }
    }
}

/// Builds and normalizes an entity, logging and tagging any rejection.
fn build_entity<T: Entity>(action: &str, record: &Record) -> FacadeResult<T> {
    let mut entity = T::from_record(record).map_err(|err| rejected::<T>(action, err))?;
    entity
        .normalize()
        .map_err(|err| rejected::<T>(action, err))?;
    Ok(entity)
}

/// Builds a new entity from caller input.
///
/// Protected fields and back-references are dropped so they take their
/// initial values: a fresh id, the current time, empty lists.
fn build_new_entity<T: Entity>(mut data: Record) -> FacadeResult<T> {
    for key in PROTECTED_FIELDS.iter().chain(T::BACK_REFERENCES) {
        data.remove(*key);
    }
    build_entity("create", &data)
}

/// Whether a caller may set `key` on an existing entity.
fn is_updatable<T: Entity>(key: &str) -> bool {
    !PROTECTED_FIELDS.contains(&key)
        && !T::BACK_REFERENCES.contains(&key)
        && !T::FIXED_REFERENCES.contains(&key)
}

fn rejected<T: Entity>(action: &str, source: ValidationError) -> FacadeError {
    warn!(
        "event=entity_{action} module=facade status=error entity={} error_code=validation_failed kind={} error={}",
        T::KIND,
        source.kind(),
        source
    );
    FacadeError::Validation {
        entity: T::KIND,
        source,
    }
}

fn create_entity<T: Entity, R: Repository<T>>(repo: &R, data: Record) -> FacadeResult<Record> {
    let entity: T = build_new_entity(data)?;
    store_entity(repo, &entity)
}

fn store_entity<T: Entity, R: Repository<T>>(repo: &R, entity: &T) -> FacadeResult<Record> {
    let stored = repo.create(entity)?;
    info!(
        "event=entity_create module=facade status=ok entity={} id={}",
        T::KIND,
        stored.id()
    );
    Ok(stored.to_dict())
}

fn get_entity<T: Entity, R: Repository<T>>(repo: &R, id: Uuid) -> FacadeResult<Option<Record>> {
    Ok(repo.get(id)?.map(|entity| entity.to_dict()))
}

fn list_entities<T: Entity, R: Repository<T>>(repo: &R) -> FacadeResult<Vec<Record>> {
    Ok(repo.list()?.iter().map(|entity| entity.to_dict()).collect())
}

/// Merges the updatable `fields` over the stored snapshot of `id`.
fn merged_record<T: Entity, R: Repository<T>>(
    repo: &R,
    id: Uuid,
    fields: Record,
) -> FacadeResult<Record> {
    let existing = repo.get(id)?.ok_or(FacadeError::NotFound {
        entity: T::KIND,
        id,
    })?;
    let mut merged = existing.to_dict();
    for (key, value) in fields {
        if is_updatable::<T>(&key) {
            merged.insert(key, value);
        }
    }
    Ok(merged)
}

fn persist_update<T: Entity, R: Repository<T>>(
    repo: &R,
    id: Uuid,
    entity: &T,
) -> FacadeResult<Record> {
    repo.update(id, entity)?;
    info!(
        "event=entity_update module=facade status=ok entity={} id={}",
        T::KIND,
        id
    );
    repo.get(id)?
        .map(|stored| stored.to_dict())
        .ok_or(FacadeError::InconsistentState(
            "updated entity not found in read-back",
        ))
}

fn update_entity<T: Entity, R: Repository<T>>(
    repo: &R,
    id: Uuid,
    fields: Record,
) -> FacadeResult<Record> {
    let merged = merged_record(repo, id, fields)?;
    let entity: T = build_entity("update", &merged)?;
    persist_update(repo, id, &entity)
}

fn delete_entity<T: Entity, R: Repository<T>>(repo: &R, id: Uuid) -> FacadeResult<()> {
    repo.delete(id)?;
    info!(
        "event=entity_delete module=facade status=ok entity={} id={}",
        T::KIND,
        id
    );
    Ok(())
}
