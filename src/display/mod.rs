//! Display formatting for terminal output
//!
//! Turns snapshots into the text the CLI prints. Transaction lists are
//! formatted by the history report.

pub mod category;
pub mod participant;

pub use category::{format_category_details, format_category_tree};
pub use participant::format_participant_list;
