//! Lodging database: connection setup and schema versioning.
//!
//! The schema holds four keyed tables (`users`, `places`, `amenities`,
//! `reviews`). Relation lists such as `users.places` are JSON text columns
//! owned by the relation manager; there are no SQL foreign keys between the
//! tables.
//!
//! # Invariants
//! - `PRAGMA user_version` equals the number of the last applied migration.
//! - A database written by a newer build is never opened or downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// `found` is the file's schema version, `supported` the newest this
    /// build can migrate to.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "lodging schema v{found} is newer than this build (supports up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
