//! User settings for HomeBudget
//!
//! Settings live next to the data directory in `config.json`. They configure
//! the CLI and the snapshot store, never the ledger contents.

use serde::{Deserialize, Serialize};

use super::paths::HomeBudgetPaths;
use crate::error::HomeBudgetError;
use crate::storage::file_io::write_json_atomic;

/// User settings for HomeBudget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// User key used when `--user` is not given
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Quiet period before a pending snapshot is written, in milliseconds
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,

    /// How many times a failed snapshot write is retried before it is dropped
    #[serde(default = "default_save_retries")]
    pub save_retries: u32,

    /// Currency symbol appended to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_user() -> String {
    "default".to_string()
}

fn default_save_debounce_ms() -> u64 {
    500
}

fn default_save_retries() -> u32 {
    3
}

fn default_currency() -> String {
    "₽".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_user: default_user(),
            save_debounce_ms: default_save_debounce_ms(),
            save_retries: default_save_retries(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &HomeBudgetPaths) -> Result<Self, HomeBudgetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| HomeBudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| HomeBudgetError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HomeBudgetPaths) -> Result<(), HomeBudgetError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.save_debounce_ms, 500);
        assert_eq!(settings.save_retries, 3);
        assert_eq!(settings.default_user, "default");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HomeBudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_user: "alice".into(),
            save_debounce_ms: 50,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"currency_symbol": "$"}"#).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.save_retries, 3);
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HomeBudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ nope").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, HomeBudgetError::Config(_)));
    }
}
