//! Amenity domain model.

use super::validation::{check_text, ValidationError};
use super::{now_epoch_ms, Entity};
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an amenity.
pub type AmenityId = Uuid;

pub const MAX_AMENITY_NAME_CHARS: usize = 50;

/// Named facility that places reference by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    #[serde(default = "Uuid::new_v4")]
    pub id: AmenityId,
    pub name: String,
    #[serde(default = "now_epoch_ms")]
    pub created_at: i64,
    #[serde(default = "now_epoch_ms")]
    pub updated_at: i64,
}

impl Amenity {
    /// Requires a non-blank name of at most 50 characters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("name", &self.name, MAX_AMENITY_NAME_CHARS)
    }

    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=amenity_validate module=model status=error kind={} error={}",
                    err.kind(),
                    err
                );
                false
            }
        }
    }
}

impl Entity for Amenity {
    const KIND: &'static str = "amenity";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.validate()
    }
}
