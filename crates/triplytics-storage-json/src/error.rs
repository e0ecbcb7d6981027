use std::io;

use thiserror::Error;

/// Why a snapshot could not be read or written. Malformed records inside an
/// otherwise readable document are repaired, never reported here.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot file access failed: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Serde(String),
    #[error("Unsupported snapshot layout: {0}")]
    Layout(String),
    #[error("Snapshot `{0}` not found")]
    NotFound(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return StorageError::Io(err.into());
        }
        StorageError::Serde(err.to_string())
    }
}
