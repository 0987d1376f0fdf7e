//! Review domain model.
//!
//! # Invariants
//! - `rating` is an integer in `1..=5`.
//! - `place_id` and `user_id` reference existing records at creation time.

use super::place::PlaceId;
use super::user::UserId;
use super::validation::ValidationError;
use super::{now_epoch_ms, Entity};
use log::warn;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Stable identifier of a review.
pub type ReviewId = Uuid;

pub const RATING_RANGE: RangeInclusive<i64> = 1..=5;

/// Guest review of one place, written by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default = "Uuid::new_v4")]
    pub id: ReviewId,
    pub text: String,
    pub rating: i64,
    pub place_id: PlaceId,
    /// Author of the review.
    pub user_id: UserId,
    #[serde(default = "now_epoch_ms")]
    pub created_at: i64,
    #[serde(default = "now_epoch_ms")]
    pub updated_at: i64,
}

impl Review {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::Required("text"));
        }
        if !RATING_RANGE.contains(&self.rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating",
                expected: "between 1 and 5",
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=review_validate module=model status=error kind={} error={}",
                    err.kind(),
                    err
                );
                false
            }
        }
    }
}

impl Entity for Review {
    const KIND: &'static str = "review";
    const FIXED_REFERENCES: &'static [&'static str] = &["place_id", "user_id"];

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
