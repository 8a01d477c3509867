//! Typed error enum for the storage layer.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation (inventory number collision).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// SQL / connection / lock failure.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Row data could not be deserialized into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Connection mutex poisoned by a panicking thread.
    #[error("database lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    /// Whether this error is a unique-constraint violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Custom `From<rusqlite::Error>` — NOT blanket `#[from]`.
///
/// - `QueryReturnedNoRows` → `NotFound` (generic; callers remap with entity context)
/// - constraint violations → `Duplicate`
/// - row-decoding failures → `DataCorruption`
/// - everything else → `Database`
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => {
                Self::NotFound { entity: "row", id: "unknown".into() }
            },
            rusqlite::Error::SqliteFailure(code, ref msg)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Duplicate(msg.clone().unwrap_or_else(|| code.to_string()))
            },
            rusqlite::Error::FromSqlConversionFailure(column, sql_type, source) => {
                Self::DataCorruption {
                    context: format!("column {column} ({sql_type})"),
                    source,
                }
            },
            _ => Self::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_maps_to_duplicate() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
            Some("UNIQUE constraint failed: artifacts.inventory_number".to_owned()),
        );
        let mapped = StorageError::from(err);
        assert!(mapped.is_duplicate());
    }

    #[test]
    fn row_decoding_failure_maps_to_data_corruption() {
        let parse_err = chrono::DateTime::parse_from_rfc3339("not a timestamp").unwrap_err();
        let err = rusqlite::Error::FromSqlConversionFailure(
            12,
            rusqlite::types::Type::Text,
            Box::new(parse_err),
        );
        assert!(matches!(StorageError::from(err), StorageError::DataCorruption { .. }));
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert!(StorageError::from(rusqlite::Error::QueryReturnedNoRows).is_not_found());
    }
}
