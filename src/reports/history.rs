//! Transaction history report
//!
//! Filters, sorts and groups the transaction list. When sorted by date the
//! entries are grouped per calendar day (UTC) with a daily total.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::{AppState, Category, CategoryId, CategoryKind, Money, Transaction, TransactionType};

/// Filter options for the history report
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// First day to include
    pub start_date: Option<NaiveDate>,
    /// Last day to include (inclusive)
    pub end_date: Option<NaiveDate>,
    /// Keep transactions touching any of these categories, on either side
    pub categories: Vec<CategoryId>,
    /// Keep transactions belonging to any of these participants
    pub participants: Vec<String>,
}

impl HistoryFilter {
    /// Check if a transaction matches this filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        let day = txn.date.date_naive();
        if let Some(start) = self.start_date {
            if day < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if day > end {
                return false;
            }
        }

        if !self.categories.is_empty()
            && !self.categories.iter().any(|id| txn.references_category(id))
        {
            return false;
        }

        if !self.participants.is_empty() && !self.participants.contains(&txn.participant) {
            return false;
        }

        true
    }

    /// Number of active filter criteria
    pub fn active_count(&self) -> usize {
        usize::from(self.start_date.is_some() || self.end_date.is_some())
            + usize::from(!self.categories.is_empty())
            + usize::from(!self.participants.is_empty())
    }
}

/// Ordering of the history list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    DateDesc,
    DateAsc,
    CategoryAsc,
    CategoryDesc,
    AmountDesc,
    AmountAsc,
}

impl SortOption {
    /// Whether entries are grouped per day under this ordering
    pub fn groups_by_day(&self) -> bool {
        matches!(self, Self::DateDesc | Self::DateAsc)
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::CategoryAsc => "category-asc",
            Self::CategoryDesc => "category-desc",
            Self::AmountDesc => "amount-desc",
            Self::AmountAsc => "amount-asc",
        };
        write!(f, "{}", key)
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date-desc" | "date" => Ok(Self::DateDesc),
            "date-asc" => Ok(Self::DateAsc),
            "category-asc" | "category" => Ok(Self::CategoryAsc),
            "category-desc" => Ok(Self::CategoryDesc),
            "amount-desc" | "amount" => Ok(Self::AmountDesc),
            "amount-asc" => Ok(Self::AmountAsc),
            other => Err(format!(
                "unknown sort option '{}' (expected date-desc, date-asc, category-asc, \
                 category-desc, amount-desc or amount-asc)",
                other
            )),
        }
    }
}

/// A transaction with its display title resolved
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub transaction: Transaction,
    /// "Cash" or "Cash → Groceries"; "Unknown" for a dangling id
    pub title: String,
}

/// Entries of one calendar day
#[derive(Debug, Clone)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub entries: Vec<HistoryEntry>,
    /// Income minus spending for the day, see [`daily_total`]
    pub total: Money,
}

/// History Report
#[derive(Debug, Clone)]
pub struct HistoryReport {
    pub sort: SortOption,
    /// Matching transactions in display order
    pub entries: Vec<HistoryEntry>,
    /// Per-day groups; empty unless the ordering groups by day
    pub days: Vec<DayGroup>,
}

impl HistoryReport {
    /// Build the report from a snapshot
    pub fn generate(state: &AppState, filter: &HistoryFilter, sort: SortOption) -> Self {
        let categories: HashMap<&CategoryId, &Category> =
            state.categories.iter().map(|c| (&c.id, c)).collect();
        let name_of = |id: &CategoryId| categories.get(id).map(|c| c.name.as_str());

        let mut matching: Vec<&Transaction> = state
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .collect();

        matching.sort_by(|a, b| match sort {
            SortOption::DateDesc => b.date.cmp(&a.date),
            SortOption::DateAsc => a.date.cmp(&b.date),
            SortOption::CategoryAsc => {
                compare_names(name_of(&a.category_id), name_of(&b.category_id))
            }
            SortOption::CategoryDesc => {
                compare_names(name_of(&b.category_id), name_of(&a.category_id))
            }
            SortOption::AmountDesc => b.magnitude().cmp(&a.magnitude()),
            SortOption::AmountAsc => a.magnitude().cmp(&b.magnitude()),
        });

        let entries: Vec<HistoryEntry> = matching
            .into_iter()
            .map(|txn| {
                let from = name_of(&txn.category_id).unwrap_or("Unknown");
                let title = match txn.to_category_id.as_ref().and_then(|to| name_of(to)) {
                    Some(to) if txn.is_transfer() => format!("{} → {}", from, to),
                    _ => from.to_string(),
                };
                HistoryEntry {
                    transaction: txn.clone(),
                    title,
                }
            })
            .collect();

        let days = if sort.groups_by_day() {
            group_by_day(state, &entries)
        } else {
            Vec::new()
        };

        Self {
            sort,
            entries,
            days,
        }
    }

    /// Format the report for terminal display
    ///
    /// Day headers use `date_format` (strftime); an invalid format falls back
    /// to ISO dates.
    pub fn format_terminal(&self, currency_symbol: &str, date_format: &str) -> String {
        let mut output = String::new();

        if self.entries.is_empty() {
            output.push_str("No transactions match.\n");
            return output;
        }

        if self.sort.groups_by_day() {
            for day in &self.days {
                output.push_str(&format!(
                    "{}  (total {})\n",
                    format_day(day.date, date_format),
                    day.total.format_with_symbol(currency_symbol)
                ));
                for entry in &day.entries {
                    output.push_str(&format_entry(entry, currency_symbol));
                }
                output.push('\n');
            }
        } else {
            for entry in &self.entries {
                output.push_str(&format_entry(entry, currency_symbol));
            }
        }

        output
    }
}

/// Net money flow of a set of transactions, from the household's point of view
///
/// Income adds its magnitude. A transfer into an `Expenses` category counts
/// as spending. Plain expenses and other transfers do not move the total.
pub fn daily_total<'a>(
    state: &AppState,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Money {
    transactions
        .into_iter()
        .map(|txn| match txn.kind {
            TransactionType::Income => -txn.amount,
            TransactionType::Transfer => {
                let into_expenses = txn
                    .to_category_id
                    .as_ref()
                    .and_then(|to| state.category(to))
                    .is_some_and(|c| c.kind == CategoryKind::Expenses);
                if into_expenses {
                    -txn.amount
                } else {
                    Money::zero()
                }
            }
            TransactionType::Expense => Money::zero(),
        })
        .sum()
}

fn group_by_day(state: &AppState, entries: &[HistoryEntry]) -> Vec<DayGroup> {
    let mut days: Vec<DayGroup> = Vec::new();
    for entry in entries {
        let date = entry.transaction.date.date_naive();
        match days.last_mut() {
            Some(day) if day.date == date => day.entries.push(entry.clone()),
            _ => days.push(DayGroup {
                date,
                entries: vec![entry.clone()],
                total: Money::zero(),
            }),
        }
    }
    for day in &mut days {
        day.total = daily_total(state, day.entries.iter().map(|e| &e.transaction));
    }
    days
}

/// Unknown categories sort after every named one
fn compare_names(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn format_day(date: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        return date.to_string();
    }
    out
}

fn format_entry(entry: &HistoryEntry, currency_symbol: &str) -> String {
    let txn = &entry.transaction;
    let sign = match txn.kind {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
        TransactionType::Transfer => " ",
    };
    let detail = if txn.note.is_empty() {
        txn.participant.as_str()
    } else {
        txn.note.as_str()
    };
    format!(
        "  {} {:<28} {:<20} {}{:>14}  [{}]\n",
        txn.date.format("%H:%M"),
        entry.title,
        detail,
        sign,
        txn.magnitude().format_with_symbol(currency_symbol),
        txn.id
    )
}
