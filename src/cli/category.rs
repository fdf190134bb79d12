//! Category CLI commands
//!
//! Implements CLI commands for category management and balance corrections.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::category::{format_category_details, format_category_tree};
use crate::error::{BudgetResult, HomeBudgetError};
use crate::ledger::Action;
use crate::models::{AppState, Category, CategoryKind, Money};
use crate::store::SnapshotStore;

use super::report_outcome;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories (grouped by type)
    List,

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Opening balance (e.g., "1500" or "1500.50")
        #[arg(short, long)]
        balance: Option<String>,
        /// Category type: personal, expenses or shared
        #[arg(short = 't', long = "type", default_value = "personal")]
        kind: CategoryKind,
        /// Icon key
        #[arg(long)]
        icon: Option<String>,
        /// Colour token
        #[arg(long)]
        color: Option<String>,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<CategoryKind>,
        /// New icon key
        #[arg(long)]
        icon: Option<String>,
        /// New colour token
        #[arg(long)]
        color: Option<String>,
    },

    /// Overwrite a category balance (a correction, not a transaction)
    #[command(name = "set-balance")]
    SetBalance {
        /// Category name or ID
        category: String,
        /// New balance
        #[arg(allow_hyphen_values = true)]
        balance: String,
    },

    /// Put categories in a new order
    Reorder {
        /// Every category name or ID, in the desired order
        #[arg(required = true)]
        categories: Vec<String>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
        /// Also delete every transaction touching the category
        #[arg(long)]
        force: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(
    store: &SnapshotStore,
    settings: &Settings,
    cmd: CategoryCommands,
) -> BudgetResult<()> {
    let state = store.snapshot()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_tree(&state, symbol));
        }

        CategoryCommands::Show { category } => {
            let cat = find_category(&state, &category)?;
            print!("{}", format_category_details(cat, &state, symbol));
        }

        CategoryCommands::Add {
            name,
            balance,
            kind,
            icon,
            color,
        } => {
            let mut category = Category::new(name.trim()).with_kind(kind);
            if let Some(balance) = balance {
                category.balance = parse_amount(&balance)?;
            }
            if let Some(icon) = icon {
                category.icon = icon;
            }
            if let Some(color) = color {
                category.color = color;
            }
            category
                .validate()
                .map_err(|e| HomeBudgetError::Validation(e.to_string()))?;

            if state
                .categories
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(&category.name))
            {
                return Err(HomeBudgetError::Duplicate {
                    entity_type: "Category",
                    identifier: category.name,
                });
            }

            let outcome = store.dispatch(Action::AddCategory(category.clone()))?;
            report_outcome(&outcome, || {
                format!(
                    "Created category: {}\n  ID: {}\n  Balance: {}",
                    category.name,
                    category.id,
                    category.balance.format_with_symbol(symbol)
                )
            });
        }

        CategoryCommands::Edit {
            category,
            name,
            kind,
            icon,
            color,
        } => {
            let current = find_category(&state, &category)?;

            if name.is_none() && kind.is_none() && icon.is_none() && color.is_none() {
                println!("No changes specified. Use --name, --type, --icon or --color.");
                return Ok(());
            }

            let mut updated = current.clone();
            if let Some(name) = name {
                updated.name = name.trim().to_string();
            }
            if let Some(kind) = kind {
                updated.kind = kind;
            }
            if let Some(icon) = icon {
                updated.icon = icon;
            }
            if let Some(color) = color {
                updated.color = color;
            }
            updated
                .validate()
                .map_err(|e| HomeBudgetError::Validation(e.to_string()))?;

            let outcome = store.dispatch(Action::UpdateCategory(updated.clone()))?;
            report_outcome(&outcome, || format!("Updated category: {}", updated.name));
        }

        CategoryCommands::SetBalance { category, balance } => {
            let cat = find_category(&state, &category)?;
            let balance = parse_amount(&balance)?;
            let previous = cat.balance;

            let outcome = store.dispatch(Action::UpdateCategoryBalance {
                category_id: cat.id.clone(),
                balance,
            })?;
            report_outcome(&outcome, || {
                format!(
                    "Corrected balance of {}: {} -> {}",
                    cat.name,
                    previous.format_with_symbol(symbol),
                    balance.format_with_symbol(symbol)
                )
            });
        }

        CategoryCommands::Reorder { categories } => {
            let order = categories
                .iter()
                .map(|identifier| find_category(&state, identifier).map(|c| c.id.clone()))
                .collect::<BudgetResult<Vec<_>>>()?;

            let outcome = store.dispatch(Action::ReorderCategories(order))?;
            report_outcome(&outcome, || "Categories reordered.".to_string());
        }

        CategoryCommands::Delete { category, force } => {
            let cat = find_category(&state, &category)?;
            let usage = state.category_usage(&cat.id);

            if usage > 0 && !force {
                return Err(HomeBudgetError::Validation(format!(
                    "Category '{}' has {} transaction(s). Use --force to delete them too.",
                    cat.name, usage
                )));
            }

            let outcome = store.dispatch(Action::DeleteCategory(cat.id.clone()))?;
            report_outcome(&outcome, || {
                if usage > 0 {
                    format!("Deleted category: {} ({} transactions removed)", cat.name, usage)
                } else {
                    format!("Deleted category: {}", cat.name)
                }
            });
        }
    }

    Ok(())
}

/// Resolve a category by id or name
pub(crate) fn find_category<'a>(state: &'a AppState, identifier: &str) -> BudgetResult<&'a Category> {
    state
        .find_category(identifier)
        .ok_or_else(|| HomeBudgetError::category_not_found(identifier))
}

fn parse_amount(input: &str) -> BudgetResult<Money> {
    Money::parse(input).map_err(|e| HomeBudgetError::Validation(format!("Invalid amount: {}", e)))
}
