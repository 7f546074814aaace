//! Row decoding and error mapping shared by the SQLite repositories.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::infrastructure::ports::RepoError;

/// Extension trait for `SqliteRow` to decode the column shapes used here.
pub trait RowExt {
    fn get_string(&self, column: &str) -> Result<String, RepoError>;

    /// Parse a typed id stored as its UUID string.
    fn get_id<T>(&self, column: &str) -> Result<T, RepoError>
    where
        T: FromStr,
        T::Err: Display;

    fn get_optional_id<T>(&self, column: &str) -> Result<Option<T>, RepoError>
    where
        T: FromStr,
        T::Err: Display;

    fn get_json(&self, column: &str) -> Result<Value, RepoError>;

    /// RFC 3339 timestamp column.
    fn get_datetime(&self, column: &str) -> Result<DateTime<Utc>, RepoError>;
}

impl RowExt for SqliteRow {
    fn get_string(&self, column: &str) -> Result<String, RepoError> {
        self.try_get::<String, _>(column)
            .map_err(|e| RepoError::database("decode", e))
    }

    fn get_id<T>(&self, column: &str) -> Result<T, RepoError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get_string(column)?
            .parse()
            .map_err(|e: T::Err| RepoError::serialization(format!("{column}: {e}")))
    }

    fn get_optional_id<T>(&self, column: &str) -> Result<Option<T>, RepoError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self
            .try_get::<Option<String>, _>(column)
            .map_err(|e| RepoError::database("decode", e))?;
        raw.map(|s| {
            s.parse()
                .map_err(|e: T::Err| RepoError::serialization(format!("{column}: {e}")))
        })
        .transpose()
    }

    fn get_json(&self, column: &str) -> Result<Value, RepoError> {
        let raw = self.get_string(column)?;
        serde_json::from_str(&raw).map_err(|e| RepoError::serialization(format!("{column}: {e}")))
    }

    fn get_datetime(&self, column: &str) -> Result<DateTime<Utc>, RepoError> {
        let raw = self.get_string(column)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| RepoError::serialization(format!("{column}: {e}")))
    }
}

pub fn to_json_text(value: &Value) -> Result<String, RepoError> {
    serde_json::to_string(value).map_err(|e| RepoError::Serialization(e.to_string()))
}

/// Map a write failure, surfacing key violations as constraint errors.
pub fn write_error(operation: &'static str, error: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() || db.is_foreign_key_violation() {
            return RepoError::constraint(format!("{operation}: {}", db.message()));
        }
    }
    RepoError::database(operation, error)
}
