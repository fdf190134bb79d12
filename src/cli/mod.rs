//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the snapshot store.

pub mod category;
pub mod data;
pub mod participant;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use data::{
    handle_export_command, handle_import_command, handle_opacity_command, handle_reset_command,
    handle_theme_command, ExportFormat,
};
pub use participant::{handle_participant_command, ParticipantCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::ledger::Outcome;

/// Print the result of a dispatched action
///
/// The success message is only built when the action was applied; ignored
/// actions produce a warning on stderr instead.
pub(crate) fn report_outcome(outcome: &Outcome, success: impl FnOnce() -> String) {
    match outcome.rejection() {
        None => println!("{}", success()),
        Some(reason) => eprintln!("Warning: nothing changed: {}", reason),
    }
}
