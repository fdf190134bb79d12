//! Participant display formatting

use crate::models::participant::is_shared;
use crate::models::AppState;

/// Format participants with the number of transactions each one owns
pub fn format_participant_list(state: &AppState) -> String {
    if state.participants.is_empty() {
        return "No participants found.\n".to_string();
    }

    let name_width = state
        .participants
        .iter()
        .map(|p| p.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::from("Participants:\n");
    for name in &state.participants {
        let marker = if is_shared(name) { " (protected)" } else { "" };
        output.push_str(&format!(
            "  {:<width$}  {:>4} transactions{}\n",
            name,
            state.participant_usage(name),
            marker,
            width = name_width
        ));
    }
    output
}
