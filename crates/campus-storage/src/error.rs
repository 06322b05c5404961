//! Storage error types for campus-storage.
//!
//! Dangling references found while relinking a snapshot are not errors --
//! they are skipped and reported through
//! [`LoadReport`](crate::link::LoadReport) so one corrupt record cannot
//! prevent the rest of the dataset from loading.

use thiserror::Error;

/// Errors produced by snapshot save/load operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing a snapshot file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
