//! Report preferences for Triplytics: currency label, default period,
//! colour output and where snapshots live. Stored as one JSON file.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, CONFIG_KEYS};
