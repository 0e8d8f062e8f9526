//! Storage Layer
//!
//! In-memory record store with repository pattern. Holds the immutable raw
//! snapshot and the clean table, and publishes the analysis view as a
//! projection computed on every read.

mod repository;

pub use repository::{load_snapshot, Repository};

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Lock poisoned: {0}")]
    Lock(String),
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
