use std::{io, result::Result as StdResult};

use thiserror::Error;
use triplytics_config::ConfigError;
use triplytics_core::CoreError;
use triplytics_storage_json::StorageError;

/// Unified error type for core, config and storage layers.
#[derive(Error, Debug)]
pub enum TriplyticsError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),
}

pub type Result<T> = StdResult<T, TriplyticsError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TriplyticsError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Output failed: {0}")]
    Output(#[from] io::Error),
}

impl From<ConfigError> for TriplyticsError {
    fn from(err: ConfigError) -> Self {
        TriplyticsError::Config(err.to_string())
    }
}

impl From<StorageError> for TriplyticsError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) => TriplyticsError::SnapshotNotFound(name),
            other => TriplyticsError::Storage(other.to_string()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(TriplyticsError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(TriplyticsError::from(err))
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        CliError::from(TriplyticsError::from(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::from(TriplyticsError::Storage(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_not_found_maps_to_snapshot_not_found() {
        let err = TriplyticsError::from(StorageError::NotFound("july".into()));
        assert!(matches!(err, TriplyticsError::SnapshotNotFound(ref name) if name == "july"));
        assert_eq!(err.to_string(), "Snapshot not found: july");
    }

    #[test]
    fn unknown_period_surfaces_suggestion() {
        let err = CliError::from(triplytics_core::parse_period("montly").unwrap_err());
        assert_eq!(
            err.to_string(),
            "Unknown period selector `montly` (did you mean `monthly`?)"
        );
    }
}
