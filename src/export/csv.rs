//! CSV export
//!
//! Transactions only, one row each, with category names resolved so the
//! file opens cleanly in a spreadsheet.

use std::collections::HashMap;
use std::io::Write;

use crate::error::BudgetResult;
use crate::models::{AppState, CategoryId};

const HEADER: [&str; 8] = [
    "ID",
    "Date",
    "Type",
    "Category",
    "To Category",
    "Participant",
    "Note",
    "Amount",
];

/// Export all transactions to CSV
pub fn export_transactions_csv<W: Write>(state: &AppState, writer: W) -> BudgetResult<()> {
    let category_names: HashMap<&CategoryId, &str> = state
        .categories
        .iter()
        .map(|c| (&c.id, c.name.as_str()))
        .collect();
    let name_of = |id: &CategoryId| category_names.get(id).copied().unwrap_or("Unknown");

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for txn in &state.transactions {
        let date = txn.date.to_rfc3339();
        let kind = txn.kind.to_string();
        let to_category = txn.to_category_id.as_ref().map(name_of).unwrap_or("");
        let amount = txn.amount.to_string();

        csv_writer.write_record([
            txn.id.as_str(),
            date.as_str(),
            kind.as_str(),
            name_of(&txn.category_id),
            to_category,
            txn.participant.as_str(),
            txn.note.as_str(),
            amount.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
