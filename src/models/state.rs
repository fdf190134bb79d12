//! The ledger aggregate root
//!
//! `AppState` is the whole user-visible dataset: the unit the reducer
//! transforms, the store publishes, and persistence serializes.

use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryKind};
use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use super::participant::{is_shared, SHARED_PARTICIPANT};
use super::theme::Theme;
use super::transaction::Transaction;

/// Default opacity of the bottom navigation bar
pub const DEFAULT_BOTTOM_NAV_OPACITY: f64 = 0.8;

fn default_bottom_nav_opacity() -> f64 {
    DEFAULT_BOTTOM_NAV_OPACITY
}

/// Complete ledger snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Categories in user-chosen order
    pub categories: Vec<Category>,

    /// Transactions in insertion order
    pub transactions: Vec<Transaction>,

    /// Known participant names, unique
    pub participants: Vec<String>,

    /// Theme preference
    #[serde(default)]
    pub theme: Theme,

    /// Bottom navigation opacity preference (0.0 - 1.0)
    #[serde(default = "default_bottom_nav_opacity")]
    pub bottom_nav_opacity: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::empty()
    }
}

impl AppState {
    /// A state with no data at all
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            transactions: Vec::new(),
            participants: Vec::new(),
            theme: Theme::default(),
            bottom_nav_opacity: DEFAULT_BOTTOM_NAV_OPACITY,
        }
    }

    /// The snapshot a brand-new user starts with
    pub fn seed() -> Self {
        Self {
            categories: default_categories(),
            transactions: Vec::new(),
            participants: default_participants(),
            theme: Theme::default(),
            bottom_nav_opacity: DEFAULT_BOTTOM_NAV_OPACITY,
        }
    }

    /// Find a category by id
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Find a category by id, mutably
    pub fn category_mut(&mut self, id: &CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| &c.id == id)
    }

    /// Find a category by id or (case-insensitive) name
    pub fn find_category(&self, identifier: &str) -> Option<&Category> {
        let identifier = identifier.trim();
        self.categories
            .iter()
            .find(|c| c.id.as_str() == identifier)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|c| c.name.to_lowercase() == identifier.to_lowercase())
            })
    }

    /// Check whether a category id exists
    pub fn has_category(&self, id: &CategoryId) -> bool {
        self.category(id).is_some()
    }

    /// Find a transaction by id
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Check whether a transaction id exists
    pub fn has_transaction(&self, id: &TransactionId) -> bool {
        self.transaction(id).is_some()
    }

    /// Check whether a participant name is known (the sentinel always is)
    pub fn has_participant(&self, name: &str) -> bool {
        is_shared(name) || self.participants.iter().any(|p| p == name)
    }

    /// Sum of all category balances
    pub fn total_balance(&self) -> Money {
        self.categories.iter().map(|c| c.balance).sum()
    }

    /// Category ids in display order
    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|c| c.id.clone()).collect()
    }

    /// Number of transactions referencing a participant
    pub fn participant_usage(&self, name: &str) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.participant == name)
            .count()
    }

    /// Number of transactions referencing a category on either side
    pub fn category_usage(&self, id: &CategoryId) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.references_category(id))
            .count()
    }
}

/// Categories seeded for a new user
pub fn default_categories() -> Vec<Category> {
    let seed = [
        ("1", "Mine", 6_396_400_i64, "User", "text-sky-400", CategoryKind::Personal),
        ("2", "Nadia", 555137, "User", "text-pink-400", CategoryKind::Personal),
        ("3", "Andrew", 0, "User", "text-amber-400", CategoryKind::Personal),
        ("4", "Sushi", 0, "UtensilsCrossed", "text-emerald-400", CategoryKind::Expenses),
        ("5", "Vacation", 54615300, "Plane", "text-blue-400", CategoryKind::Shared),
        ("6", "Garage", 642900, "Warehouse", "text-orange-400", CategoryKind::Expenses),
        ("7", "Fuel", 0, "Fuel", "text-red-400", CategoryKind::Expenses),
        ("8", "Groceries", 0, "ShoppingCart", "text-lime-400", CategoryKind::Expenses),
        ("9", "Ozon", 0, "ShoppingCart", "text-indigo-400", CategoryKind::Expenses),
        ("10", "WB", 0, "ShoppingCart", "text-purple-400", CategoryKind::Expenses),
        ("11", "Cash", 1000000, "Banknote", "text-green-500", CategoryKind::Personal),
        ("12", "Sberbank", 0, "Landmark", "text-green-600", CategoryKind::Personal),
    ];

    seed.into_iter()
        .map(|(id, name, cents, icon, color, kind)| {
            Category::with_id(id, name)
                .with_balance(Money::from_cents(cents))
                .with_style(icon, color)
                .with_kind(kind)
        })
        .collect()
}

/// Participants seeded for a new user
pub fn default_participants() -> Vec<String> {
    [SHARED_PARTICIPANT, "Me", "Nadia", "Andrew"]
        .into_iter()
        .map(String::from)
        .collect()
}
