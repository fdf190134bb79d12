//! Category model
//!
//! A category is an account holding money ("Cash", "Vacation", "Groceries").
//! Its balance is a running total owned by the ledger reducer; it is never
//! recomputed from transaction history.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;

/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// How a category is grouped for display and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryKind {
    /// Money belonging to one person
    #[default]
    #[serde(alias = "Личные")]
    Personal,
    /// A spending bucket; transfers into it count as spending
    #[serde(alias = "Расходы")]
    Expenses,
    /// Money pooled by the household
    #[serde(alias = "Общие")]
    Shared,
}

impl CategoryKind {
    /// Get all kinds in display order
    pub fn all() -> &'static [Self] {
        &[Self::Personal, Self::Expenses, Self::Shared]
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal => write!(f, "Personal"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Shared => write!(f, "Shared"),
        }
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "expenses" | "expense" => Ok(Self::Expenses),
            "shared" => Ok(Self::Shared),
            other => Err(format!("unknown category type: {}", other)),
        }
    }
}

/// An account holding money
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique, stable identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Current balance, maintained by the reducer
    pub balance: Money,

    /// Icon key understood by the presentation layer
    #[serde(default)]
    pub icon: String,

    /// Colour token understood by the presentation layer
    #[serde(default)]
    pub color: String,

    /// Display grouping
    #[serde(rename = "type", default)]
    pub kind: CategoryKind,
}

impl Category {
    /// Create a new category with a fresh id and a zero balance
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(CategoryId::new(), name)
    }

    /// Create a new category with a caller-supplied id and a zero balance
    pub fn with_id(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance: Money::zero(),
            icon: "Wallet".to_string(),
            color: String::new(),
            kind: CategoryKind::default(),
        }
    }

    /// Set the opening balance
    pub fn with_balance(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }

    /// Set icon and colour
    pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    /// Set the display grouping
    pub fn with_kind(mut self, kind: CategoryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(CategoryValidationError::EmptyId);
        }

        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyId,
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Category id cannot be empty"),
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Groceries");
        assert_eq!(category.name, "Groceries");
        assert!(category.balance.is_zero());
        assert_eq!(category.kind, CategoryKind::Personal);
    }

    #[test]
    fn test_builder() {
        let category = Category::with_id("5", "Vacation")
            .with_balance(Money::from_cents(54615300))
            .with_style("Plane", "text-blue-400")
            .with_kind(CategoryKind::Shared);

        assert_eq!(category.id.as_str(), "5");
        assert_eq!(category.balance.cents(), 54615300);
        assert_eq!(category.icon, "Plane");
        assert_eq!(category.kind, CategoryKind::Shared);
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Valid");
        assert!(category.validate().is_ok());

        category.name = "  ".to_string();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }

    #[test]
    fn test_wire_shape() {
        let category = Category::with_id("2", "Nadia")
            .with_balance(Money::from_cents(555137))
            .with_style("User", "text-pink-400");
        let value = serde_json::to_value(&category).unwrap();

        assert_eq!(value["id"], "2");
        assert_eq!(value["balance"], 5551.37);
        assert_eq!(value["type"], "Personal");
    }

    #[test]
    fn test_missing_type_defaults_to_personal() {
        let json = r#"{"id":"1","name":"Mine","balance":10,"icon":"User","color":"text-sky-400"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.kind, CategoryKind::Personal);
        assert_eq!(category.balance.cents(), 1000);
    }

    #[test]
    fn test_locale_kind_alias() {
        let json = r#"{"id":"4","name":"Sushi","balance":0,"icon":"","color":"","type":"Расходы"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.kind, CategoryKind::Expenses);
    }
}
