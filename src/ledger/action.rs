//! Ledger actions
//!
//! Every state change is expressed as one `Action` value. Actions fall into
//! three families with different guarantees:
//!
//! - **Ledger actions** (`AddTransaction`, `DeleteTransaction`) preserve the
//!   conservation law: the total of all balances moves by exactly the net
//!   effect of the transaction, and deleting reverses adding.
//! - **Corrections** (`UpdateCategoryBalance`, and `UpdateCategory` when it
//!   changes a balance) overwrite balances directly. They synthesize no
//!   transaction and deliberately break conservation, e.g. to reconcile with
//!   a real bank balance.
//! - **Structural actions** (categories, participants, preferences, resets)
//!   maintain referential integrity between entities.

use std::fmt;

use crate::export::ValidatedState;
use crate::models::{Category, CategoryId, Money, Theme, Transaction, TransactionId};

/// A single state transition request
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append a transaction and apply its balance effect
    AddTransaction(Transaction),
    /// Remove a transaction and reverse its balance effect
    DeleteTransaction(TransactionId),
    /// Overwrite a category balance (correction, not a ledger event)
    UpdateCategoryBalance {
        category_id: CategoryId,
        balance: Money,
    },
    /// Reorder categories; must be a permutation of the current ids
    ReorderCategories(Vec<CategoryId>),
    /// Append a new category
    AddCategory(Category),
    /// Replace a category's fields by id
    UpdateCategory(Category),
    /// Remove a category and every transaction touching it
    DeleteCategory(CategoryId),
    /// Register a participant name (idempotent)
    AddParticipant(String),
    /// Rename a participant everywhere
    UpdateParticipant { old_name: String, new_name: String },
    /// Remove a participant, reassigning its transactions to the sentinel
    DeleteParticipant(String),
    /// Change the theme preference
    SetTheme(Theme),
    /// Change the bottom navigation opacity preference
    SetBottomNavOpacity(f64),
    /// Restore the default snapshot, keeping the theme
    ResetState,
    /// Overwrite everything with a validated snapshot
    ReplaceState(ValidatedState),
}

impl Action {
    /// Short machine-friendly name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTransaction(_) => "add_transaction",
            Self::DeleteTransaction(_) => "delete_transaction",
            Self::UpdateCategoryBalance { .. } => "update_category_balance",
            Self::ReorderCategories(_) => "reorder_categories",
            Self::AddCategory(_) => "add_category",
            Self::UpdateCategory(_) => "update_category",
            Self::DeleteCategory(_) => "delete_category",
            Self::AddParticipant(_) => "add_participant",
            Self::UpdateParticipant { .. } => "update_participant",
            Self::DeleteParticipant(_) => "delete_participant",
            Self::SetTheme(_) => "set_theme",
            Self::SetBottomNavOpacity(_) => "set_bottom_nav_opacity",
            Self::ResetState => "reset_state",
            Self::ReplaceState(_) => "replace_state",
        }
    }

    /// True for actions that obey the conservation law
    pub fn is_ledger_event(&self) -> bool {
        matches!(self, Self::AddTransaction(_) | Self::DeleteTransaction(_))
    }

    /// True for manual balance corrections
    pub fn is_correction(&self) -> bool {
        matches!(self, Self::UpdateCategoryBalance { .. })
    }
}

/// Result of applying an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The state was transformed
    Applied,
    /// The action was a no-op; the state is unchanged
    Ignored(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// The rejection reason, if the action was ignored
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Applied => None,
            Self::Ignored(r) => Some(r),
        }
    }
}

/// Why an action left the state untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    DuplicateTransaction(TransactionId),
    UnknownTransaction(TransactionId),
    DuplicateCategory(CategoryId),
    UnknownCategory(CategoryId),
    /// Transfer without a destination, to itself, or a destination on a non-transfer
    MalformedTransfer(TransactionId),
    NotAPermutation,
    UnknownParticipant(String),
    ParticipantExists(String),
    ProtectedParticipant(String),
    InvalidOpacity,
    /// Applying the amount would overflow a balance
    BalanceOverflow(CategoryId),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTransaction(id) => write!(f, "transaction {} already exists", id),
            Self::UnknownTransaction(id) => write!(f, "transaction {} does not exist", id),
            Self::DuplicateCategory(id) => write!(f, "category {} already exists", id),
            Self::UnknownCategory(id) => write!(f, "category {} does not exist", id),
            Self::MalformedTransfer(id) => {
                write!(f, "transaction {} has an invalid destination category", id)
            }
            Self::NotAPermutation => {
                write!(f, "new order is not a permutation of the existing categories")
            }
            Self::UnknownParticipant(name) => write!(f, "participant {} does not exist", name),
            Self::ParticipantExists(name) => write!(f, "participant {} already exists", name),
            Self::ProtectedParticipant(name) => {
                write!(f, "participant {} cannot be removed or renamed", name)
            }
            Self::InvalidOpacity => write!(f, "opacity must be a number"),
            Self::BalanceOverflow(id) => write!(f, "balance of category {} would overflow", id),
        }
    }
}
