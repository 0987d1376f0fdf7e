//! `users` table mapping.

use super::sqlite_repo::{
    bool_column, json_list_column, json_list_value, uuid_column, SqliteRecord, SqliteRepository,
};
use super::RepoResult;
use crate::model::user::User;
use rusqlite::types::Value;
use rusqlite::Row;

/// SQLite-backed user repository.
pub type SqliteUserRepository<'conn> = SqliteRepository<'conn, User>;

impl SqliteRecord for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] =
        &["first_name", "last_name", "email", "is_admin", "places"];

    fn column_values(&self) -> RepoResult<Vec<Value>> {
        Ok(vec![
            Value::Text(self.first_name.clone()),
            Value::Text(self.last_name.clone()),
            Value::Text(self.email.clone()),
            Value::Integer(i64::from(self.is_admin)),
            json_list_value(&self.places)?,
        ])
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: uuid_column(row, Self::TABLE, "id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            is_admin: bool_column(row, Self::TABLE, "is_admin")?,
            places: json_list_column(row, Self::TABLE, "places")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
