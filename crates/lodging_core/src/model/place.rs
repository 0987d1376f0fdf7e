//! Place domain model.
//!
//! # Responsibility
//! - Define the listing record owned by one user.
//! - Validate title, price and coordinates.
//!
//! # Invariants
//! - `owner_id` references an existing user at creation time.
//! - `owner_first_name` is copied from the owner at creation and never
//!   refreshed afterwards.
//! - `amenities` holds amenity names, `reviews` holds review ids, both in
//!   attachment order.

use super::review::ReviewId;
use super::user::UserId;
use super::validation::{check_text, ValidationError};
use super::{now_epoch_ms, Entity};
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a place.
pub type PlaceId = Uuid;

pub const MAX_TITLE_CHARS: usize = 100;

/// Listing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default = "Uuid::new_v4")]
    pub id: PlaceId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Nightly price; must be non-negative.
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: UserId,
    /// Denormalized copy of the owner's first name.
    #[serde(default)]
    pub owner_first_name: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<ReviewId>,
    #[serde(default = "now_epoch_ms")]
    pub created_at: i64,
    #[serde(default = "now_epoch_ms")]
    pub updated_at: i64,
}

impl Place {
    /// Appends one amenity name.
    pub fn add_amenity(&mut self, name: impl Into<String>) {
        self.amenities.push(name.into());
    }

    /// Appends one review id.
    pub fn add_review(&mut self, review_id: ReviewId) {
        self.reviews.push(review_id);
    }

    /// Validates all fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("title", &self.title, MAX_TITLE_CHARS)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "price",
                expected: "a non-negative number",
            });
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::OutOfRange {
                field: "latitude",
                expected: "between -90 and 90",
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::OutOfRange {
                field: "longitude",
                expected: "between -180 and 180",
            });
        }
        Ok(())
    }

    /// Collapsed validity check; failures are logged and return `false`.
    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=place_validate module=model status=error kind={} error={}",
                    err.kind(),
                    err
                );
                false
            }
        }
    }
}

impl Entity for Place {
    const KIND: &'static str = "place";
    const BACK_REFERENCES: &'static [&'static str] = &["amenities", "reviews"];
    const FIXED_REFERENCES: &'static [&'static str] = &["owner_id", "owner_first_name"];

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
