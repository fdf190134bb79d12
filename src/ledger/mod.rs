//! The ledger state machine
//!
//! `Action` values describe every possible change; `apply` turns a snapshot
//! and an action into the next snapshot plus an `Outcome`.

pub mod action;
pub mod reducer;

pub use action::{Action, Outcome, Rejection};
pub use reducer::{apply, reduce};
