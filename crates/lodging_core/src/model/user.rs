//! User domain model.
//!
//! # Responsibility
//! - Define the account record that owns places and writes reviews.
//! - Validate names and email syntax, normalizing the email on success.
//!
//! # Invariants
//! - `first_name` and `last_name` are at most 50 characters.
//! - `email` is syntactically valid; its domain is stored lowercase.
//! - `places` holds owned place ids in creation order. It is a cache of the
//!   `Place::owner_id` relation and is maintained by the relation manager.

use super::validation::{check_max_len, ValidationError};
use super::{now_epoch_ms, Entity};
use crate::model::place::PlaceId;
use email_address::{EmailAddress, Options};
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a user.
pub type UserId = Uuid;

pub const MAX_NAME_CHARS: usize = 50;
const MAX_EMAIL_CHARS: usize = 254;

/// Bare addresses only: no display name, no domain literal, and at least
/// one dot in the domain.
const EMAIL_OPTIONS: Options = Options {
    minimum_sub_domains: 2,
    allow_domain_literal: false,
    allow_display_text: false,
};

/// Account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default = "Uuid::new_v4")]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Owned place ids, oldest first.
    #[serde(default)]
    pub places: Vec<PlaceId>,
    #[serde(default = "now_epoch_ms")]
    pub created_at: i64,
    #[serde(default = "now_epoch_ms")]
    pub updated_at: i64,
}

impl User {
    /// Creates a non-admin user with a generated id and no places.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = now_epoch_ms();
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            is_admin: false,
            places: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends one owned place id.
    pub fn add_place(&mut self, place_id: PlaceId) {
        self.places.push(place_id);
    }

    /// Validates all fields and returns the normalized email.
    ///
    /// # Errors
    /// - `TooLong` when a name exceeds 50 characters.
    /// - `InvalidEmail` when the email fails syntax validation.
    pub fn validate(&self) -> Result<String, ValidationError> {
        check_max_len("first_name", &self.first_name, MAX_NAME_CHARS)?;
        check_max_len("last_name", &self.last_name, MAX_NAME_CHARS)?;
        normalize_email(&self.email)
    }

    /// Collapsed validity check.
    ///
    /// Returns the normalized email, or `None` after logging the failure kind.
    pub fn is_valid(&self) -> Option<String> {
        match self.validate() {
            Ok(email) => Some(email),
            Err(err) => {
                warn!(
                    "event=user_validate module=model status=error kind={} error={}",
                    err.kind(),
                    err
                );
                None
            }
        }
    }
}

impl Entity for User {
    const KIND: &'static str = "user";
    const BACK_REFERENCES: &'static [&'static str] = &["places"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.validate().map(|_| ())
    }

    fn normalize(&mut self) -> Result<(), ValidationError> {
        self.email = self.validate()?;
        Ok(())
    }
}

/// Validates email syntax and returns the canonical form.
///
/// Surrounding whitespace is trimmed and the domain is lowercased. The local
/// part is kept as written. Internationalized local parts and domains are
/// accepted.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() > MAX_EMAIL_CHARS {
        return Err(ValidationError::InvalidEmail(
            "address is too long".to_string(),
        ));
    }
    let address = EmailAddress::parse_with_options(trimmed, EMAIL_OPTIONS)
        .map_err(|err| ValidationError::InvalidEmail(err.to_string()))?;
    Ok(format!(
        "{}@{}",
        address.local_part(),
        address.domain().to_lowercase()
    ))
}
