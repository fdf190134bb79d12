//! Participant names
//!
//! Participants are plain unique name strings; transactions reference them by
//! name, never by id. The sentinel [`SHARED_PARTICIPANT`] always exists
//! implicitly, cannot be deleted or renamed, and absorbs the transactions of
//! deleted participants.

use std::fmt;

/// The household-wide participant that can never be removed
pub const SHARED_PARTICIPANT: &str = "Shared";

/// Russian-locale spelling of the sentinel found in legacy snapshots
pub const LEGACY_SHARED_PARTICIPANT: &str = "Общие";

/// Maximum length of a participant name
pub const MAX_PARTICIPANT_NAME_LEN: usize = 50;

/// Check whether a name denotes the sentinel participant, in either spelling
pub fn is_shared(name: &str) -> bool {
    name == SHARED_PARTICIPANT || name == LEGACY_SHARED_PARTICIPANT
}

/// Map legacy spellings of the sentinel onto the canonical one
pub fn canonical_name(name: &str) -> &str {
    if name == LEGACY_SHARED_PARTICIPANT {
        SHARED_PARTICIPANT
    } else {
        name
    }
}

/// Normalize a participant name for duplicate checks
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Trim and validate a participant name entered by a user
///
/// The legacy sentinel spelling comes back as [`SHARED_PARTICIPANT`].
pub fn clean_name(name: &str) -> Result<String, ParticipantValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ParticipantValidationError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_PARTICIPANT_NAME_LEN {
        return Err(ParticipantValidationError::NameTooLong(len));
    }
    Ok(canonical_name(trimmed).to_string())
}

/// Find an existing participant whose name matches case-insensitively
pub fn find_similar<'a>(participants: &'a [String], name: &str) -> Option<&'a str> {
    let normalized = normalize_name(name);
    participants
        .iter()
        .find(|p| normalize_name(p) == normalized)
        .map(String::as_str)
}

/// Validation errors for participant names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for ParticipantValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Participant name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Participant name too long ({} chars, max {})",
                len, MAX_PARTICIPANT_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for ParticipantValidationError {}
