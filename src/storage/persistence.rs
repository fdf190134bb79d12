//! The persistence seam
//!
//! The store never talks to a disk or a network directly; it goes through a
//! [`SnapshotPersistence`] keyed by the signed-in user. Saves are whole
//! snapshots, last writer wins.

use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{BudgetResult, HomeBudgetError};
use crate::models::AppState;

/// Opaque identity of the user whose snapshot is loaded and saved
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserKey(String);

impl UserKey {
    /// Create a user key; blank keys are rejected
    pub fn new(key: impl Into<String>) -> BudgetResult<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(HomeBudgetError::Validation("User key cannot be empty".into()));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A file-name-safe rendering of the key
    ///
    /// ASCII letters, digits, `-` and `.` are kept; every other byte of the
    /// UTF-8 encoding, `_` included, becomes `_XX` in upper-case hex, so
    /// distinct keys never share a file.
    pub fn file_stem(&self) -> String {
        let mut stem = String::with_capacity(self.0.len());
        for byte in self.0.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.') {
                stem.push(char::from(byte));
            } else {
                let _ = write!(stem, "_{:02X}", byte);
            }
        }
        stem
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loads and saves whole snapshots for a user
pub trait SnapshotPersistence: Send + Sync {
    /// Load the user's snapshot, `None` if the user has never saved one
    fn load(&self, user: &UserKey) -> BudgetResult<Option<AppState>>;

    /// Replace the user's stored snapshot
    fn save(&self, user: &UserKey, state: &AppState) -> BudgetResult<()>;
}

/// Snapshots kept in process memory
///
/// Used for tests and for embedding the ledger without a disk. Saves can be
/// made to fail on demand to exercise retry handling.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    snapshots: Mutex<HashMap<UserKey, AppState>>,
    saves: AtomicUsize,
    failures: AtomicUsize,
    failures_pending: AtomicUsize,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a stored snapshot for a user
    pub fn with_snapshot(user: &UserKey, state: AppState) -> Self {
        let persistence = Self::default();
        if let Ok(mut snapshots) = persistence.snapshots.lock() {
            snapshots.insert(user.clone(), state);
        }
        persistence
    }

    /// The last snapshot saved for a user
    pub fn stored(&self, user: &UserKey) -> Option<AppState> {
        self.snapshots
            .lock()
            .ok()
            .and_then(|snapshots| snapshots.get(user).cloned())
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of saves that failed so far
    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    /// Make the next `count` saves fail
    pub fn fail_next_saves(&self, count: usize) {
        self.failures_pending.store(count, Ordering::SeqCst);
    }
}

impl SnapshotPersistence for InMemoryPersistence {
    fn load(&self, user: &UserKey) -> BudgetResult<Option<AppState>> {
        let snapshots = self
            .snapshots
            .lock()
            .map_err(|e| HomeBudgetError::Storage(format!("Failed to acquire lock: {}", e)))?;
        Ok(snapshots.get(user).cloned())
    }

    fn save(&self, user: &UserKey, state: &AppState) -> BudgetResult<()> {
        let should_fail = self
            .failures_pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            self.failures.fetch_add(1, Ordering::SeqCst);
            return Err(HomeBudgetError::Storage("simulated save failure".into()));
        }

        let mut snapshots = self
            .snapshots
            .lock()
            .map_err(|e| HomeBudgetError::Storage(format!("Failed to acquire lock: {}", e)))?;
        snapshots.insert(user.clone(), state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
