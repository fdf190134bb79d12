//! Category display formatting
//!
//! Formats categories for terminal output, grouped by kind in a tree view.

use crate::models::{AppState, Category, CategoryKind, Money};

/// Format categories as a tree grouped by kind, preserving the user's order
pub fn format_category_tree(state: &AppState, currency_symbol: &str) -> String {
    if state.categories.is_empty() {
        return "No categories found.\n\nRun 'homebudget category add <NAME>' to create one.\n"
            .to_string();
    }

    let name_width = state
        .categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    let mut first = true;

    for kind in CategoryKind::all() {
        let members: Vec<&Category> = state.categories.iter().filter(|c| c.kind == *kind).collect();
        if members.is_empty() {
            continue;
        }
        if !first {
            output.push('\n');
        }
        first = false;

        let subtotal: Money = members.iter().map(|c| c.balance).sum();
        output.push_str(&format!(
            "{} ({})\n",
            kind,
            subtotal.format_with_symbol(currency_symbol)
        ));

        for (j, category) in members.iter().enumerate() {
            let prefix = if j == members.len() - 1 { "└── " } else { "├── " };
            output.push_str(&format!(
                "  {}{:<width$}  {:>16}  [{}]\n",
                prefix,
                category.name,
                category.balance.format_with_symbol(currency_symbol),
                category.id,
                width = name_width
            ));
        }
    }

    output.push_str(&format!(
        "\nTotal: {}\n",
        state.total_balance().format_with_symbol(currency_symbol)
    ));
    output
}

/// Format detailed information about a single category
pub fn format_category_details(category: &Category, state: &AppState, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:           {}\n", category.id));
    output.push_str(&format!("  Type:         {}\n", category.kind));
    output.push_str(&format!(
        "  Balance:      {}\n",
        category.balance.format_with_symbol(currency_symbol)
    ));
    if !category.icon.is_empty() {
        output.push_str(&format!("  Icon:         {}\n", category.icon));
    }
    if !category.color.is_empty() {
        output.push_str(&format!("  Color:        {}\n", category.color));
    }
    output.push_str(&format!(
        "  Transactions: {}\n",
        state.category_usage(&category.id)
    ));

    output
}
