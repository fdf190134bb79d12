//! YAML export
//!
//! Same shape as the JSON export, for people who want to read or hand-edit
//! their data.

use crate::error::{BudgetResult, HomeBudgetError};
use crate::models::AppState;
use chrono::Utc;
use std::io::Write;

use super::validate::{validate_yaml, ValidatedState};

/// Export the full snapshot to YAML
pub fn export_yaml<W: Write>(state: &AppState, writer: &mut W) -> BudgetResult<()> {
    write_header(writer, state).map_err(|e| HomeBudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, state).map_err(|e| HomeBudgetError::Export(e.to_string()))?;

    Ok(())
}

fn write_header<W: Write>(writer: &mut W, state: &AppState) -> std::io::Result<()> {
    writeln!(writer, "# HomeBudget snapshot export")?;
    writeln!(writer, "# Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(writer, "# App Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        writer,
        "# {} categories, {} transactions, {} participants",
        state.categories.len(),
        state.transactions.len(),
        state.participants.len()
    )?;
    writeln!(writer, "#")?;
    writeln!(writer, "# Restore with `homebudget import <file>`.")?;
    writeln!(writer)
}

/// Import from a YAML export
pub fn import_from_yaml(yaml_str: &str) -> BudgetResult<ValidatedState> {
    validate_yaml(yaml_str)
}
