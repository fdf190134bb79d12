//! Path management for HomeBudget
//!
//! ## Path Resolution Order
//!
//! 1. `HOMEBUDGET_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/homebudget` on Linux, `%APPDATA%\homebudget\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::HomeBudgetError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "HOMEBUDGET_DATA_DIR";

/// Manages all paths used by HomeBudget
#[derive(Debug, Clone)]
pub struct HomeBudgetPaths {
    /// Base directory for all HomeBudget data
    base_dir: PathBuf,
}

impl HomeBudgetPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, HomeBudgetError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create HomeBudgetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one snapshot file per user
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Snapshot file for a user, named after the (already sanitized) file stem
    pub fn snapshot_file(&self, file_stem: &str) -> PathBuf {
        self.data_dir().join(format!("{}.json", file_stem))
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), HomeBudgetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| HomeBudgetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| HomeBudgetError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, HomeBudgetError> {
    ProjectDirs::from("", "", "homebudget")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| HomeBudgetError::Config("Could not determine a home directory".into()))
}
