//! File-backed snapshot persistence
//!
//! One pretty-printed JSON file per user under the data directory, written
//! atomically. Files are validated on load exactly like an import, so a
//! hand-edited or legacy file cannot put the ledger into an inconsistent
//! state.

use serde_json::Value;

use crate::config::paths::HomeBudgetPaths;
use crate::error::{BudgetResult, HomeBudgetError};
use crate::export::validate_value;
use crate::models::AppState;

use super::file_io::{read_json_optional, write_json_atomic};
use super::persistence::{SnapshotPersistence, UserKey};

/// Stores each user's snapshot in `data/<user>.json`
#[derive(Debug, Clone)]
pub struct FileSnapshotStorage {
    paths: HomeBudgetPaths,
}

impl FileSnapshotStorage {
    /// Create the storage, making sure the data directory exists
    pub fn new(paths: HomeBudgetPaths) -> BudgetResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &HomeBudgetPaths {
        &self.paths
    }

    /// Check whether a user has a stored snapshot
    pub fn exists(&self, user: &UserKey) -> bool {
        self.paths.snapshot_file(&user.file_stem()).exists()
    }
}

impl SnapshotPersistence for FileSnapshotStorage {
    fn load(&self, user: &UserKey) -> BudgetResult<Option<AppState>> {
        let path = self.paths.snapshot_file(&user.file_stem());
        let Some(value) = read_json_optional::<Value, _>(&path)? else {
            return Ok(None);
        };

        let validated = validate_value(value).map_err(|e| {
            HomeBudgetError::Storage(format!("Snapshot {} is invalid: {}", path.display(), e))
        })?;
        Ok(Some(validated.into_inner()))
    }

    fn save(&self, user: &UserKey, state: &AppState) -> BudgetResult<()> {
        write_json_atomic(self.paths.snapshot_file(&user.file_stem()), state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{reduce, Action};
    use crate::models::{Money, Transaction};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, FileSnapshotStorage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HomeBudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = FileSnapshotStorage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.exists(&UserKey::new("alice").unwrap()));
    }

    #[test]
    fn test_missing_snapshot_loads_none() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserKey::new("alice").unwrap();
        assert_eq!(storage.load(&user).unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserKey::new("alice").unwrap();

        let state = reduce(
            AppState::seed(),
            Action::AddTransaction(Transaction::expense("4".into(), Money::from_cents(1999))),
        );
        storage.save(&user, &state).unwrap();

        assert!(storage.exists(&user));
        assert_eq!(storage.load(&user).unwrap(), Some(state));
    }

    #[test]
    fn test_users_are_isolated() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserKey::new("alice").unwrap();
        let bob = UserKey::new("bob").unwrap();

        storage.save(&alice, &AppState::seed()).unwrap();
        assert_eq!(storage.load(&bob).unwrap(), None);
    }

    #[test]
    fn test_similar_user_keys_get_separate_files() {
        let (_temp_dir, storage) = create_test_storage();
        let spaced = UserKey::new("a b").unwrap();
        let slashed = UserKey::new("a/b").unwrap();
        let underscored = UserKey::new("a_b").unwrap();

        let mut themed = AppState::seed();
        themed.theme = crate::models::Theme::Ocean;
        storage.save(&spaced, &themed).unwrap();
        storage.save(&slashed, &AppState::seed()).unwrap();

        assert_eq!(storage.load(&spaced).unwrap(), Some(themed));
        assert_eq!(storage.load(&slashed).unwrap(), Some(AppState::seed()));
        assert_eq!(storage.load(&underscored).unwrap(), None);
    }

    #[test]
    fn test_extreme_balances_survive_reload() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserKey::new("alice").unwrap();

        let mut state = AppState::seed();
        state.categories[0].balance = Money::from_cents(Money::MAX_CENTS);
        state.categories[1].balance = Money::from_cents(-Money::MAX_CENTS);
        state.categories[2].balance = Money::from_cents(-1);
        storage.save(&user, &state).unwrap();

        assert_eq!(storage.load(&user).unwrap(), Some(state));
    }

    #[test]
    fn test_inconsistent_file_is_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserKey::new("alice").unwrap();
        let path = storage.paths().snapshot_file(&user.file_stem());
        std::fs::write(
            &path,
            r#"{"categories": [], "transactions": [{"id": "t", "categoryId": "9", "amount": 1,
                "type": "Expense", "participant": "Shared", "note": "", "date": "2025-01-01T00:00:00Z"}],
                "participants": ["Shared"], "theme": "Midnight"}"#,
        )
        .unwrap();

        let err = storage.load(&user).unwrap_err();
        assert!(matches!(err, HomeBudgetError::Storage(_)));
        assert!(err.to_string().contains("unknown category 9"));
    }
}
