//! Field validation errors shared by all entities.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Coarse classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Input had the wrong shape or a required field was missing.
    Type,
    /// Field had the right type but an unacceptable value.
    Value,
    /// Email address is syntactically malformed.
    Email,
}

impl Display for ValidationErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type => write!(f, "type"),
            Self::Value => write!(f, "value"),
            Self::Email => write!(f, "email"),
        }
    }
}

/// Tagged validation failure for entity fields.
///
/// Messages never echo the rejected value, so they are safe to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input mapping could not be decoded into the entity shape.
    Type(String),
    /// Required text field is blank after trim.
    Required(&'static str),
    /// Text field exceeds its maximum length in characters.
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Numeric field is outside its accepted range.
    OutOfRange {
        field: &'static str,
        expected: &'static str,
    },
    /// Email address failed syntax validation. Carries the parser's reason,
    /// which never quotes the address.
    InvalidEmail(String),
}

impl ValidationError {
    /// Returns the coarse class of this failure.
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::Type(_) => ValidationErrorKind::Type,
            Self::Required(_) | Self::TooLong { .. } | Self::OutOfRange { .. } => {
                ValidationErrorKind::Value
            }
            Self::InvalidEmail(_) => ValidationErrorKind::Email,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type(details) => write!(f, "invalid field type: {details}"),
            Self::Required(field) => write!(f, "{field} must not be blank"),
            Self::TooLong { field, max, actual } => write!(
                f,
                "{field} must be at most {max} characters, got {actual}"
            ),
            Self::OutOfRange { field, expected } => write!(f, "{field} must be {expected}"),
            Self::InvalidEmail(reason) => write!(f, "email not valid: {reason}"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects blank text and text longer than `max` characters.
pub(crate) fn check_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    check_max_len(field, value, max)
}

/// Rejects text longer than `max` characters; blank text is accepted.
pub(crate) fn check_max_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}
