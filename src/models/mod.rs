//! Core data models for HomeBudget
//!
//! This module contains the entities the ledger operates on: categories,
//! transactions, participant names, the theme preference, and the `AppState`
//! aggregate that ties them together. Models carry no ledger behaviour.

pub mod category;
pub mod ids;
pub mod money;
pub mod participant;
pub mod state;
pub mod theme;
pub mod transaction;

pub use category::{Category, CategoryKind};
pub use ids::{CategoryId, TransactionId};
pub use money::Money;
pub use participant::SHARED_PARTICIPANT;
pub use state::AppState;
pub use theme::Theme;
pub use transaction::{Transaction, TransactionType};
