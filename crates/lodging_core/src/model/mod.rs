//! Lodging domain model.
//!
//! # Responsibility
//! - Define the four persisted records: users, places, amenities, reviews.
//! - Own field-level validation and the dict (`Record`) snapshot form.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID v4 that is never reused.
//! - Relations are stored as id/name lists, never as expanded objects.
//! - Timestamps are Unix epoch milliseconds.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub mod amenity;
pub mod place;
pub mod review;
pub mod user;
pub mod validation;

/// Field-name keyed snapshot of one entity, used for input and output.
pub type Record = serde_json::Map<String, Value>;

/// Behavior shared by every persisted entity.
pub trait Entity: Serialize + DeserializeOwned + Sized {
    /// Lowercase entity name used in errors and log events.
    const KIND: &'static str;

    /// List fields maintained by the relation manager.
    ///
    /// Facades start them empty on create and keep the stored value on
    /// update.
    const BACK_REFERENCES: &'static [&'static str] = &[];

    /// Reference fields set once at creation and kept on facade updates.
    const FIXED_REFERENCES: &'static [&'static str] = &[];

    /// Stable entity id.
    fn id(&self) -> Uuid;

    /// Creation time in epoch milliseconds.
    fn created_at(&self) -> i64;

    /// Runs field validation without mutating the entity.
    fn check(&self) -> Result<(), validation::ValidationError>;

    /// Validates and canonicalizes fields in place.
    ///
    /// Defaults to [`Entity::check`] for entities without normalized fields.
    fn normalize(&mut self) -> Result<(), validation::ValidationError> {
        self.check()
    }

    /// Builds an entity from an input mapping.
    ///
    /// Missing required fields and JSON type mismatches are reported as
    /// [`validation::ValidationError::Type`]. Field values are not checked.
    fn from_record(record: &Record) -> Result<Self, validation::ValidationError> {
        serde_json::from_value(Value::Object(record.clone()))
            .map_err(|err| validation::ValidationError::Type(err.to_string()))
    }

    /// Returns the stable dict snapshot of this entity.
    fn to_dict(&self) -> Record {
        let value = serde_json::to_value(self);
        // Entities are structs with string keys and plain field types, so
        // serialization always yields an object.
        debug_assert!(
            matches!(value, Ok(Value::Object(_))),
            "{} did not serialize to an object",
            Self::KIND
        );
        match value {
            Ok(Value::Object(map)) => map,
            _ => Record::new(),
        }
    }
}

/// Current wall clock as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
