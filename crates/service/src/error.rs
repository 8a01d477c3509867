//! Typed error enum for the service layer.

use thiserror::Error;
use trove_storage::StorageError;

/// Service-layer error unifying storage and input failures.
///
/// Geocoding and QR failures never appear here: both degrade to an
/// absent coordinate or QR reference on the persisted record.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (empty name, oversized field).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Upload could not be written to disk.
    #[error("upload: {0}")]
    Upload(#[source] std::io::Error),

    /// Blocking task was cancelled or panicked.
    #[error("runtime: {0}")]
    Runtime(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Runtime(err.to_string())
    }
}
