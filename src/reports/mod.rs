//! Reports module for HomeBudget
//!
//! Provides the transaction history: filtering, sorting and per-day totals.

pub mod history;

pub use history::{daily_total, DayGroup, HistoryEntry, HistoryFilter, HistoryReport, SortOption};
