//! Generic SQLite repository over one entity table.
//!
//! # Responsibility
//! - Build the keyed CRUD statements from a per-entity column mapping.
//! - Convert rows back to entities and re-check them on read.
//!
//! # Invariants
//! - Every table has `id TEXT PRIMARY KEY`, `created_at` and `updated_at`.
//! - `updated_at` is refreshed on every update; `created_at` never changes.
//! - List order is `created_at ASC, id ASC`.

use super::{RepoError, RepoResult, Repository};
use crate::db::migrations::{current_version, latest_version};
use crate::model::{now_epoch_ms, Entity};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use uuid::Uuid;

/// Column mapping between one entity and its table.
pub trait SqliteRecord: Entity {
    const TABLE: &'static str;
    /// Data columns, excluding `id`, `created_at` and `updated_at`.
    const COLUMNS: &'static [&'static str];

    /// Values for [`SqliteRecord::COLUMNS`], in the same order.
    fn column_values(&self) -> RepoResult<Vec<Value>>;

    /// Decodes one row selected with `id`, the data columns and timestamps.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// SQLite-backed repository for any [`SqliteRecord`] entity.
pub struct SqliteRepository<'conn, T> {
    conn: &'conn Connection,
    _entity: PhantomData<fn() -> T>,
}

impl<'conn, T: SqliteRecord> SqliteRepository<'conn, T> {
    /// Creates a repository over a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self {
            conn,
            _entity: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!(
            "SELECT id, {}, created_at, updated_at FROM {}",
            T::COLUMNS.join(", "),
            T::TABLE
        )
    }

    fn parse_checked(row: &Row<'_>) -> RepoResult<T> {
        let entity = T::from_row(row)?;
        entity.check().map_err(|err| {
            RepoError::InvalidData(format!(
                "{} {} failed validation: {err}",
                T::KIND,
                entity.id()
            ))
        })?;
        Ok(entity)
    }
}

impl<T: SqliteRecord> Repository<T> for SqliteRepository<'_, T> {
    fn get(&self, id: Uuid) -> RepoResult<Option<T>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", Self::select_sql()))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(Self::parse_checked(row)?));
        }
        Ok(None)
    }

    fn create(&self, entity: &T) -> RepoResult<T> {
        let id = entity.id();
        let created_at = entity.created_at();

        let mut values = vec![Value::Text(id.to_string())];
        values.extend(entity.column_values()?);
        values.push(Value::Integer(created_at));
        values.push(Value::Integer(created_at));

        let placeholders = vec!["?"; values.len()].join(", ");
        self.conn.execute(
            &format!(
                "INSERT INTO {} (id, {}, created_at, updated_at) VALUES ({placeholders});",
                T::TABLE,
                T::COLUMNS.join(", ")
            ),
            params_from_iter(values),
        )?;

        self.get(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("{} {id} missing after insert", T::KIND))
        })
    }

    fn update(&self, id: Uuid, entity: &T) -> RepoResult<()> {
        let assignments = T::COLUMNS
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut values = entity.column_values()?;
        values.push(Value::Integer(now_epoch_ms()));
        values.push(Value::Text(id.to_string()));

        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET {assignments}, updated_at = MAX(created_at, ?) WHERE id = ?;",
                T::TABLE
            ),
            params_from_iter(values),
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: T::KIND,
                id,
            });
        }
        Ok(())
    }

    fn delete(&self, id: Uuid) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", T::TABLE),
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: T::KIND,
                id,
            });
        }
        Ok(())
    }

    fn list(&self) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} ORDER BY created_at ASC, id ASC;",
            Self::select_sql()
        ))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(Self::parse_checked(row)?);
        }
        Ok(items)
    }
}

/// Reads a UUID stored as hyphenated text.
pub(crate) fn uuid_column(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

/// Reads a JSON array column into a list.
pub(crate) fn json_list_column<V: DeserializeOwned>(
    row: &Row<'_>,
    table: &str,
    column: &str,
) -> RepoResult<Vec<V>> {
    let text: String = row.get(column)?;
    serde_json::from_str(&text)
        .map_err(|err| RepoError::InvalidData(format!("invalid list in {table}.{column}: {err}")))
}

/// Encodes a list as JSON text for storage.
pub(crate) fn json_list_value<V: Serialize>(items: &[V]) -> RepoResult<Value> {
    serde_json::to_string(items)
        .map(Value::Text)
        .map_err(|err| RepoError::InvalidData(format!("unencodable list: {err}")))
}

pub(crate) fn bool_column(row: &Row<'_>, table: &str, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean `{other}` in {table}.{column}"
        ))),
    }
}
