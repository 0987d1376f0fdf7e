//! `places` table mapping.

use super::sqlite_repo::{
    json_list_column, json_list_value, uuid_column, SqliteRecord, SqliteRepository,
};
use super::RepoResult;
use crate::model::place::Place;
use rusqlite::types::Value;
use rusqlite::Row;

/// SQLite-backed place repository.
pub type SqlitePlaceRepository<'conn> = SqliteRepository<'conn, Place>;

impl SqliteRecord for Place {
    const TABLE: &'static str = "places";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "price",
        "latitude",
        "longitude",
        "owner_id",
        "owner_first_name",
        "amenities",
        "reviews",
    ];

    fn column_values(&self) -> RepoResult<Vec<Value>> {
        Ok(vec![
            Value::Text(self.title.clone()),
            Value::Text(self.description.clone()),
            Value::Real(self.price),
            Value::Real(self.latitude),
            Value::Real(self.longitude),
            Value::Text(self.owner_id.to_string()),
            Value::Text(self.owner_first_name.clone()),
            json_list_value(&self.amenities)?,
            json_list_value(&self.reviews)?,
        ])
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: uuid_column(row, Self::TABLE, "id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            price: row.get("price")?,
            latitude: row.get("latitude")?,
            longitude: row.get("longitude")?,
            owner_id: uuid_column(row, Self::TABLE, "owner_id")?,
            owner_first_name: row.get("owner_first_name")?,
            amenities: json_list_column(row, Self::TABLE, "amenities")?,
            reviews: json_list_column(row, Self::TABLE, "reviews")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
