use std::io;

use thiserror::Error;

/// Failures while reading, writing or editing preferences.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("configuration file is not valid JSON: {0}")]
    Serde(String),
    #[error("Unknown configuration key `{0}` (expected one of: {keys})", keys = crate::model::CONFIG_KEYS.join(", "))]
    UnknownKey(String),
    #[error("Invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}
