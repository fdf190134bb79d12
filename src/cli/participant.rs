//! Participant CLI commands
//!
//! Implements CLI commands for managing the household's participant names.

use clap::Subcommand;

use crate::display::format_participant_list;
use crate::error::{BudgetResult, HomeBudgetError};
use crate::ledger::Action;
use crate::models::participant::{canonical_name, clean_name, find_similar};
use crate::store::SnapshotStore;

use super::report_outcome;

/// Participant subcommands
#[derive(Subcommand)]
pub enum ParticipantCommands {
    /// List all participants
    List,

    /// Add a participant
    Add {
        /// Participant name
        name: String,
    },

    /// Rename a participant everywhere
    Rename {
        /// Current name
        old_name: String,
        /// New name
        new_name: String,
        /// Allow renaming onto an existing participant, merging the two
        #[arg(long)]
        merge: bool,
    },

    /// Delete a participant (their transactions move to the shared participant)
    Delete {
        /// Participant name
        name: String,
    },
}

/// Handle a participant command
pub fn handle_participant_command(store: &SnapshotStore, cmd: ParticipantCommands) -> BudgetResult<()> {
    let state = store.snapshot()?;

    match cmd {
        ParticipantCommands::List => {
            print!("{}", format_participant_list(&state));
        }

        ParticipantCommands::Add { name } => {
            let name = clean_name(&name).map_err(|e| HomeBudgetError::Validation(e.to_string()))?;

            if let Some(existing) = find_similar(&state.participants, &name) {
                return Err(HomeBudgetError::Duplicate {
                    entity_type: "Participant",
                    identifier: existing.to_string(),
                });
            }

            let outcome = store.dispatch(Action::AddParticipant(name.clone()))?;
            report_outcome(&outcome, || format!("Added participant: {}", name));
        }

        ParticipantCommands::Rename {
            old_name,
            new_name,
            merge,
        } => {
            let old_name = canonical_name(old_name.trim()).to_string();
            if !state.has_participant(&old_name) {
                return Err(HomeBudgetError::participant_not_found(old_name));
            }
            let new_name =
                clean_name(&new_name).map_err(|e| HomeBudgetError::Validation(e.to_string()))?;

            let merging = state.has_participant(&new_name);
            if merging && !merge {
                return Err(HomeBudgetError::Duplicate {
                    entity_type: "Participant",
                    identifier: new_name,
                });
            }

            let usage = state.participant_usage(&old_name);
            let outcome = store.dispatch(Action::UpdateParticipant {
                old_name: old_name.clone(),
                new_name: new_name.clone(),
            })?;
            report_outcome(&outcome, || {
                if merging {
                    format!(
                        "Merged {} into {} ({} transactions reassigned)",
                        old_name, new_name, usage
                    )
                } else {
                    format!("Renamed {} to {} ({} transactions)", old_name, new_name, usage)
                }
            });
        }

        ParticipantCommands::Delete { name } => {
            let name = canonical_name(name.trim()).to_string();
            if !state.has_participant(&name) {
                return Err(HomeBudgetError::participant_not_found(name));
            }

            let usage = state.participant_usage(&name);
            let outcome = store.dispatch(Action::DeleteParticipant(name.clone()))?;
            report_outcome(&outcome, || {
                if usage > 0 {
                    format!(
                        "Deleted participant: {} ({} transactions moved to the shared participant)",
                        name, usage
                    )
                } else {
                    format!("Deleted participant: {}", name)
                }
            });
        }
    }

    Ok(())
}
