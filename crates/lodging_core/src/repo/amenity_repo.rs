//! `amenities` table mapping.

use super::sqlite_repo::{uuid_column, SqliteRecord, SqliteRepository};
use super::RepoResult;
use crate::model::amenity::Amenity;
use rusqlite::types::Value;
use rusqlite::Row;

/// SQLite-backed amenity repository.
pub type SqliteAmenityRepository<'conn> = SqliteRepository<'conn, Amenity>;

impl SqliteRecord for Amenity {
    const TABLE: &'static str = "amenities";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn column_values(&self) -> RepoResult<Vec<Value>> {
        Ok(vec![Value::Text(self.name.clone())])
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: uuid_column(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
