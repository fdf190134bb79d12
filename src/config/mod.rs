//! Configuration module for HomeBudget
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::HomeBudgetPaths;
pub use settings::Settings;
