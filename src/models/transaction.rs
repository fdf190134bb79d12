//! Transaction model
//!
//! One ledger event. The stored amount carries the sign convention the
//! reducer relies on: positive for expenses and transfers (money leaves
//! `category_id`), negative for income (money enters `category_id`). The
//! constructors take a positive amount and resolve the sign.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use super::participant::SHARED_PARTICIPANT;

/// Kind of ledger event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money leaves the source category
    #[serde(alias = "Расход")]
    Expense,
    /// Money enters the category (stored amount is negative)
    #[serde(alias = "Доход")]
    Income,
    /// Money moves from the source to the destination category
    #[serde(alias = "Перевод")]
    Transfer,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A ledger event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Source category (destination for income)
    pub category_id: CategoryId,

    /// Signed amount, see module docs
    pub amount: Money,

    /// Event kind
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Who the money belongs to
    pub participant: String,

    /// Free-form note
    #[serde(default)]
    pub note: String,

    /// When the event happened
    pub date: DateTime<Utc>,

    /// Destination category, present iff this is a transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_category_id: Option<CategoryId>,
}

impl Transaction {
    /// Create an expense; `amount` is the positive sum spent
    pub fn expense(category_id: CategoryId, amount: Money) -> Self {
        Self::build(category_id, amount.abs(), TransactionType::Expense, None)
    }

    /// Create an income; `amount` is the positive sum received
    pub fn income(category_id: CategoryId, amount: Money) -> Self {
        Self::build(category_id, -amount.abs(), TransactionType::Income, None)
    }

    /// Create a transfer between two categories; `amount` is the positive sum moved
    pub fn transfer(from: CategoryId, to: CategoryId, amount: Money) -> Self {
        Self::build(from, amount.abs(), TransactionType::Transfer, Some(to))
    }

    fn build(
        category_id: CategoryId,
        amount: Money,
        kind: TransactionType,
        to_category_id: Option<CategoryId>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            category_id,
            amount,
            kind,
            participant: SHARED_PARTICIPANT.to_string(),
            note: String::new(),
            date: Utc::now(),
            to_category_id,
        }
    }

    /// Use a caller-supplied id
    pub fn with_id(mut self, id: impl Into<TransactionId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the participant
    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.participant = participant.into();
        self
    }

    /// Set the note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Set the date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Check if this is a transfer
    pub fn is_transfer(&self) -> bool {
        self.kind == TransactionType::Transfer
    }

    /// Check if this transaction touches the given category on either side
    pub fn references_category(&self, id: &CategoryId) -> bool {
        &self.category_id == id || self.to_category_id.as_ref() == Some(id)
    }

    /// The unsigned sum of money involved
    pub fn magnitude(&self) -> Money {
        self.amount.abs()
    }

    /// Effect of this transaction on the total of all balances
    ///
    /// Transfers net to zero; expenses and incomes change the total by `-amount`.
    pub fn net_effect(&self) -> Money {
        if self.is_transfer() {
            Money::zero()
        } else {
            -self.amount
        }
    }

    /// Validate shape and sign convention
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(TransactionValidationError::EmptyId);
        }

        match (self.kind, &self.to_category_id) {
            (TransactionType::Transfer, None) => {
                return Err(TransactionValidationError::TransferWithoutDestination)
            }
            (TransactionType::Transfer, Some(to)) if to == &self.category_id => {
                return Err(TransactionValidationError::TransferToSelf)
            }
            (TransactionType::Expense | TransactionType::Income, Some(_)) => {
                return Err(TransactionValidationError::DestinationOnNonTransfer)
            }
            _ => {}
        }

        let sign_ok = match self.kind {
            TransactionType::Expense | TransactionType::Transfer => !self.amount.is_negative(),
            TransactionType::Income => !self.amount.is_positive(),
        };
        if !sign_ok {
            return Err(TransactionValidationError::WrongSign {
                kind: self.kind,
                amount: self.amount,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.participant,
            self.magnitude()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyId,
    TransferWithoutDestination,
    TransferToSelf,
    DestinationOnNonTransfer,
    WrongSign { kind: TransactionType, amount: Money },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Transaction id cannot be empty"),
            Self::TransferWithoutDestination => {
                write!(f, "Transfer transactions need a destination category")
            }
            Self::TransferToSelf => {
                write!(f, "Transfer source and destination must differ")
            }
            Self::DestinationOnNonTransfer => {
                write!(f, "Only transfers may have a destination category")
            }
            Self::WrongSign { kind, amount } => {
                write!(f, "{} amount has the wrong sign: {}", kind, amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
