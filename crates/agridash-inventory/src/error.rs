use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Failures of a [`crate::store::KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing '{key}': {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: u64,
        quota: u64,
    },

    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

#[derive(Debug, Error)]
pub enum InventoryError {
    /// The new item was rejected before any state changed.
    #[error("invalid item: {0}")]
    Invalid(String),

    #[error("no inventory item with id {0}")]
    NotFound(Uuid),

    /// State changed in memory but could not be saved.
    #[error("failed to persist inventory: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to encode inventory: {0}")]
    Encode(#[from] serde_json::Error),
}
