//! Import and export for HomeBudget
//!
//! Provides the snapshot formats and the validator that guards imports:
//! - JSON: the authoritative snapshot shape (persistence uses it too)
//! - YAML: the same shape, human-readable
//! - CSV: transactions only, for spreadsheets

pub mod csv;
pub mod json;
pub mod validate;
pub mod yaml;

pub use self::csv::export_transactions_csv;
pub use json::{export_json, import_from_json};
pub use validate::{validate_json, validate_state, validate_value, validate_yaml, ValidatedState};
pub use yaml::{export_yaml, import_from_yaml};
