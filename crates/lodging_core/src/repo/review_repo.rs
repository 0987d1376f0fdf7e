//! `reviews` table mapping.

use super::sqlite_repo::{uuid_column, SqliteRecord, SqliteRepository};
use super::RepoResult;
use crate::model::review::Review;
use rusqlite::types::Value;
use rusqlite::Row;

/// SQLite-backed review repository.
pub type SqliteReviewRepository<'conn> = SqliteRepository<'conn, Review>;

impl SqliteRecord for Review {
    const TABLE: &'static str = "reviews";
    const COLUMNS: &'static [&'static str] = &["text", "rating", "place_id", "user_id"];

    fn column_values(&self) -> RepoResult<Vec<Value>> {
        Ok(vec![
            Value::Text(self.text.clone()),
            Value::Integer(self.rating),
            Value::Text(self.place_id.to_string()),
            Value::Text(self.user_id.to_string()),
        ])
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: uuid_column(row, Self::TABLE, "id")?,
            text: row.get("text")?,
            rating: row.get("rating")?,
            place_id: uuid_column(row, Self::TABLE, "place_id")?,
            user_id: uuid_column(row, Self::TABLE, "user_id")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
