//! Preference and data CLI commands
//!
//! Theme and opacity preferences, snapshot export and import, and reset.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::Settings;
use crate::error::{BudgetResult, HomeBudgetError};
use crate::export::{export_json, export_transactions_csv, export_yaml, import_from_json, import_from_yaml};
use crate::ledger::Action;
use crate::models::Theme;
use crate::store::SnapshotStore;

use super::report_outcome;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON snapshot (the format imports expect)
    Json,
    /// YAML snapshot, human-readable
    Yaml,
    /// CSV (transactions only)
    Csv,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Show or change the theme
pub fn handle_theme_command(store: &SnapshotStore, name: Option<String>) -> BudgetResult<()> {
    let Some(name) = name else {
        let current = store.snapshot()?.theme;
        println!("Themes:");
        for theme in Theme::all() {
            let marker = if *theme == current { "*" } else { " " };
            println!("  {} {}", marker, theme);
        }
        return Ok(());
    };

    let theme = Theme::from_name(&name)
        .ok_or_else(|| HomeBudgetError::Validation(format!("Unknown theme: {}", name)))?;
    let outcome = store.dispatch(Action::SetTheme(theme))?;
    report_outcome(&outcome, || format!("Theme set to {}", theme));
    Ok(())
}

/// Show or change the bottom navigation opacity
pub fn handle_opacity_command(store: &SnapshotStore, value: Option<f64>) -> BudgetResult<()> {
    let Some(value) = value else {
        println!("Bottom navigation opacity: {}", store.snapshot()?.bottom_nav_opacity);
        return Ok(());
    };

    let outcome = store.dispatch(Action::SetBottomNavOpacity(value))?;
    let applied = store.snapshot()?.bottom_nav_opacity;
    report_outcome(&outcome, || format!("Bottom navigation opacity set to {}", applied));
    Ok(())
}

/// Write the current snapshot to a file
pub fn handle_export_command(
    store: &SnapshotStore,
    output: PathBuf,
    format: Option<ExportFormat>,
    pretty: bool,
) -> BudgetResult<()> {
    let format = format
        .or_else(|| ExportFormat::from_path(&output))
        .unwrap_or(ExportFormat::Json);
    let state = store.snapshot()?;

    let file = File::create(&output).map_err(|e| {
        HomeBudgetError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Json => export_json(&state, &mut writer, pretty)?,
        ExportFormat::Yaml => export_yaml(&state, &mut writer)?,
        ExportFormat::Csv => export_transactions_csv(&state, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| HomeBudgetError::Export(format!("Failed to write {}: {}", output.display(), e)))?;

    match format {
        ExportFormat::Csv => {
            println!(
                "Exported {} transactions to: {}",
                state.transactions.len(),
                output.display()
            );
            println!("Note: CSV exports transactions only. Use JSON or YAML for a full snapshot.");
        }
        _ => println!("Snapshot exported to: {}", output.display()),
    }
    Ok(())
}

/// Replace the ledger with a validated snapshot from a file
///
/// Nothing changes unless the whole file passes validation.
pub fn handle_import_command(
    store: &SnapshotStore,
    file: PathBuf,
    format: Option<ExportFormat>,
) -> BudgetResult<()> {
    if !file.exists() {
        return Err(HomeBudgetError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let format = format
        .or_else(|| ExportFormat::from_path(&file))
        .unwrap_or(ExportFormat::Json);
    let content = std::fs::read_to_string(&file)
        .map_err(|e| HomeBudgetError::Import(format!("Failed to read file: {}", e)))?;

    let validated = match format {
        ExportFormat::Json => import_from_json(&content)?,
        ExportFormat::Yaml => import_from_yaml(&content)?,
        ExportFormat::Csv => {
            return Err(HomeBudgetError::Import(
                "CSV files cannot be imported; use a JSON or YAML snapshot".into(),
            ))
        }
    };

    let summary = format!(
        "Imported {} categories, {} transactions and {} participants from {}",
        validated.as_state().categories.len(),
        validated.as_state().transactions.len(),
        validated.as_state().participants.len(),
        file.display()
    );
    let outcome = store.dispatch(Action::ReplaceState(validated))?;
    report_outcome(&outcome, || summary);
    Ok(())
}

/// Restore the default snapshot
pub fn handle_reset_command(store: &SnapshotStore, settings: &Settings, yes: bool) -> BudgetResult<()> {
    if !yes {
        return Err(HomeBudgetError::Validation(
            "Reset discards all ledger data. Re-run with --yes to confirm.".into(),
        ));
    }

    let outcome = store.dispatch(Action::ResetState)?;
    let total = store.snapshot()?.total_balance();
    report_outcome(&outcome, || {
        format!(
            "Ledger reset to defaults (total {})",
            total.format_with_symbol(&settings.currency_symbol)
        )
    });
    Ok(())
}
