//! HomeBudget - a shared household budget ledger
//!
//! This library keeps a household's money in categories, records expenses,
//! incomes and transfers between them, and attributes each transaction to a
//! participant. Every change goes through a pure reducer, so the ledger can
//! be tested without any I/O.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (categories, transactions, participants)
//! - `ledger`: The `Action` enum and the reducer that applies it
//! - `store`: Session-scoped snapshot store with debounced persistence
//! - `storage`: Snapshot persistence backends
//! - `export`: JSON/YAML/CSV export and import validation
//! - `reports`: Transaction history
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use home_budget::ledger::{apply, Action};
//! use home_budget::models::{AppState, Money, Transaction};
//!
//! let state = AppState::seed();
//! let txn = Transaction::expense("11".into(), Money::from_cents(500));
//! let (next, outcome) = apply(state, Action::AddTransaction(txn));
//! assert!(outcome.is_applied());
//! assert_eq!(next.transactions.len(), 1);
//! ```

use std::sync::Once;

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod storage;
pub mod store;

pub use error::{BudgetResult, HomeBudgetError};

/// Environment variable holding the log filter (falls back to `RUST_LOG`)
pub const LOG_ENV: &str = "HOMEBUDGET_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber, once
///
/// Logs go to stderr so command output on stdout stays clean. The default
/// level is `warn`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
