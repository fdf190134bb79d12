//! Transaction CLI commands
//!
//! Implements CLI commands for recording, deleting and listing transactions.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;

use crate::config::Settings;
use crate::error::{BudgetResult, HomeBudgetError};
use crate::ledger::Action;
use crate::models::participant::canonical_name;
use crate::models::{AppState, Money, Transaction, TransactionId, SHARED_PARTICIPANT};
use crate::reports::{HistoryFilter, HistoryReport, SortOption};
use crate::store::SnapshotStore;

use super::category::find_category;
use super::report_outcome;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record money spent from a category
    Expense {
        /// Category name or ID
        category: String,
        /// Amount spent (e.g., "250" or "250.50")
        amount: String,
        #[command(flatten)]
        details: TransactionDetails,
    },

    /// Record money received into a category
    Income {
        /// Category name or ID
        category: String,
        /// Amount received
        amount: String,
        #[command(flatten)]
        details: TransactionDetails,
    },

    /// Move money between two categories
    Transfer {
        /// Source category name or ID
        from: String,
        /// Destination category name or ID
        to: String,
        /// Amount moved
        amount: String,
        #[command(flatten)]
        details: TransactionDetails,
    },

    /// Delete a transaction and reverse its effect
    Delete {
        /// Transaction ID
        id: String,
    },

    /// List transactions
    List {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Only transactions touching this category (repeatable)
        #[arg(short, long)]
        category: Vec<String>,
        /// Only transactions by this participant (repeatable)
        #[arg(short, long)]
        participant: Vec<String>,
        /// Ordering: date-desc, date-asc, category-asc, category-desc, amount-desc, amount-asc
        #[arg(short, long, default_value = "date-desc")]
        sort: SortOption,
    },
}

/// Optional fields shared by every kind of transaction
#[derive(clap::Args)]
pub struct TransactionDetails {
    /// Participant the transaction belongs to
    #[arg(short, long, default_value = SHARED_PARTICIPANT)]
    participant: String,
    /// Free-form note
    #[arg(short, long)]
    note: Option<String>,
    /// Transaction date (YYYY-MM-DD), defaults to now
    #[arg(short, long)]
    date: Option<NaiveDate>,
}

/// Handle a transaction command
pub fn handle_transaction_command(
    store: &SnapshotStore,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BudgetResult<()> {
    let state = store.snapshot()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Expense {
            category,
            amount,
            details,
        } => {
            let cat = find_category(&state, &category)?;
            let amount = parse_positive_amount(&amount)?;
            let txn = details.apply(&state, Transaction::expense(cat.id.clone(), amount))?;
            record(store, txn, || {
                format!("Recorded expense of {} from {}", amount.format_with_symbol(symbol), cat.name)
            })?;
        }

        TransactionCommands::Income {
            category,
            amount,
            details,
        } => {
            let cat = find_category(&state, &category)?;
            let amount = parse_positive_amount(&amount)?;
            let txn = details.apply(&state, Transaction::income(cat.id.clone(), amount))?;
            record(store, txn, || {
                format!("Recorded income of {} into {}", amount.format_with_symbol(symbol), cat.name)
            })?;
        }

        TransactionCommands::Transfer {
            from,
            to,
            amount,
            details,
        } => {
            let source = find_category(&state, &from)?;
            let destination = find_category(&state, &to)?;
            if source.id == destination.id {
                return Err(HomeBudgetError::Validation(
                    "Cannot transfer a category to itself".into(),
                ));
            }
            let amount = parse_positive_amount(&amount)?;
            let txn = details.apply(
                &state,
                Transaction::transfer(source.id.clone(), destination.id.clone(), amount),
            )?;
            record(store, txn, || {
                format!(
                    "Transferred {} from {} to {}",
                    amount.format_with_symbol(symbol),
                    source.name,
                    destination.name
                )
            })?;
        }

        TransactionCommands::Delete { id } => {
            let id = TransactionId::from(id.trim());
            let txn = state
                .transaction(&id)
                .ok_or_else(|| HomeBudgetError::transaction_not_found(id.as_str()))?;
            let magnitude = txn.magnitude();

            let outcome = store.dispatch(Action::DeleteTransaction(id.clone()))?;
            report_outcome(&outcome, || {
                format!(
                    "Deleted transaction {} ({})",
                    id,
                    magnitude.format_with_symbol(symbol)
                )
            });
        }

        TransactionCommands::List {
            from,
            to,
            category,
            participant,
            sort,
        } => {
            let categories = category
                .iter()
                .map(|identifier| find_category(&state, identifier).map(|c| c.id.clone()))
                .collect::<BudgetResult<Vec<_>>>()?;

            let filter = HistoryFilter {
                start_date: from,
                end_date: to,
                categories,
                participants: participant,
            };

            let report = HistoryReport::generate(&state, &filter, sort);
            print!("{}", report.format_terminal(symbol, &settings.date_format));
        }
    }

    Ok(())
}

impl TransactionDetails {
    fn apply(self, state: &AppState, txn: Transaction) -> BudgetResult<Transaction> {
        let participant = canonical_name(self.participant.trim()).to_string();
        if !state.has_participant(&participant) {
            return Err(HomeBudgetError::participant_not_found(&participant));
        }

        let mut txn = txn.with_participant(participant);
        if let Some(note) = self.note {
            txn = txn.with_note(note.trim());
        }
        if let Some(date) = self.date {
            txn = txn.with_date(on_day(date));
        }
        Ok(txn)
    }
}

fn record(
    store: &SnapshotStore,
    txn: Transaction,
    success: impl FnOnce() -> String,
) -> BudgetResult<()> {
    let id = txn.id.clone();
    let outcome = store.dispatch(Action::AddTransaction(txn))?;
    report_outcome(&outcome, || format!("{}\n  ID: {}", success(), id));
    Ok(())
}

/// A point on the given day, at the current time of day
fn on_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(Utc::now().time()).and_utc()
}

fn parse_positive_amount(input: &str) -> BudgetResult<Money> {
    let amount = Money::parse(input)
        .map_err(|e| HomeBudgetError::Validation(format!("Invalid amount: {}", e)))?;
    if !amount.is_positive() {
        return Err(HomeBudgetError::Validation(format!(
            "Amount must be positive, got {}",
            amount
        )));
    }
    Ok(amount)
}
