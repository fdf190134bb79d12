//! JSON export
//!
//! The JSON export is the authoritative snapshot shape: the same document
//! persistence writes and `import` accepts.

use crate::error::{BudgetResult, HomeBudgetError};
use crate::models::AppState;
use std::io::Write;

use super::validate::{validate_json, ValidatedState};

/// Export the full snapshot to JSON
pub fn export_json<W: Write>(state: &AppState, writer: &mut W, pretty: bool) -> BudgetResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, state)
    } else {
        serde_json::to_writer(&mut *writer, state)
    }
    .map_err(|e| HomeBudgetError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| HomeBudgetError::Export(e.to_string()))?;
    Ok(())
}

/// Import from a JSON export
pub fn import_from_json(json_str: &str) -> BudgetResult<ValidatedState> {
    validate_json(json_str)
}
