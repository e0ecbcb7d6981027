use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: [&str; 5] = [
    "locale",
    "currency",
    "ui_color_enabled",
    "default_period",
    "default_data_root",
];

/// Stores user-configurable report preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_period_value")]
    pub default_period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_snapshot: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for snapshots. Defaults to `~/Documents/Triplytics`.
    pub default_data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_period: Self::default_period_value(),
            last_snapshot: None,
            default_data_root: None,
        }
    }
}

impl Config {
    pub fn default_period_value() -> String {
        "monthly".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.default_data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Triplytics")
    }

    /// Updates a single preference from its textual form.
    ///
    /// The period value is stored as given; callers validate it against the
    /// known selectors before reporting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => self.currency = non_empty(key, value)?,
            "default_period" => self.default_period = non_empty(key, value)?.to_ascii_lowercase(),
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid(key, value)),
                }
            }
            "default_data_root" => {
                self.default_data_root = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(invalid(key, value))
    } else {
        Ok(value.to_string())
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
