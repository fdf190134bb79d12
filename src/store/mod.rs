//! The snapshot store
//!
//! One `SnapshotStore` per signed-in session. It owns the current
//! [`AppState`], runs every action through the reducer under a single mutex,
//! hands out immutable `Arc` snapshots, notifies observers, and feeds the
//! debounced persistence writer.

mod writer;

pub use writer::WriterOptions;

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{BudgetResult, HomeBudgetError};
use crate::export::validate_state;
use crate::ledger::{apply, Action, Outcome};
use crate::models::AppState;
use crate::storage::{SnapshotPersistence, UserKey};

use writer::WriterMessage;

/// Callback invoked with every newly published snapshot
///
/// Observers run while the store lock is held and must not dispatch.
pub type Observer = Box<dyn Fn(&Arc<AppState>) + Send>;

struct StoreInner {
    state: Arc<AppState>,
    observers: Vec<Observer>,
    writer: Option<mpsc::Sender<WriterMessage>>,
}

/// Session-scoped owner of the ledger
pub struct SnapshotStore {
    user: UserKey,
    inner: Mutex<StoreInner>,
    writer_handle: Mutex<Option<JoinHandle<()>>>,
}

impl From<&Settings> for WriterOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            debounce: Duration::from_millis(settings.save_debounce_ms),
            retries: settings.save_retries,
        }
    }
}

impl SnapshotStore {
    /// Open the ledger for a user
    ///
    /// A stored snapshot is validated before use. A user without one starts
    /// from the default snapshot, which is scheduled for saving right away.
    pub fn open(
        user: UserKey,
        persistence: Arc<dyn SnapshotPersistence>,
        options: WriterOptions,
    ) -> BudgetResult<Self> {
        let (state, seeded) = match persistence.load(&user)? {
            Some(stored) => (validate_state(stored)?.into_inner(), false),
            None => (AppState::seed(), true),
        };
        let state = Arc::new(state);

        let (sender, handle) = writer::spawn(user.clone(), persistence, options)?;
        if seeded {
            // The writer only stops when the sender is dropped, so this cannot fail.
            let _ = sender.send(WriterMessage::Snapshot(Arc::clone(&state)));
        }

        info!(
            user = %user,
            seeded,
            categories = state.categories.len(),
            transactions = state.transactions.len(),
            "ledger opened"
        );

        Ok(Self {
            user,
            inner: Mutex::new(StoreInner {
                state,
                observers: Vec::new(),
                writer: Some(sender),
            }),
            writer_handle: Mutex::new(Some(handle)),
        })
    }

    /// The user this store belongs to
    pub fn user(&self) -> &UserKey {
        &self.user
    }

    /// Apply an action atomically
    ///
    /// Ignored actions leave the snapshot untouched and publish nothing.
    pub fn dispatch(&self, action: Action) -> BudgetResult<Outcome> {
        let mut inner = self.lock()?;
        let Some(writer) = inner.writer.clone() else {
            return Err(HomeBudgetError::Storage(format!(
                "Ledger for {} is closed",
                self.user
            )));
        };

        let name = action.name();
        let (next, outcome) = apply((*inner.state).clone(), action);

        match &outcome {
            Outcome::Applied => {
                let next = Arc::new(next);
                inner.state = Arc::clone(&next);
                for observer in &inner.observers {
                    observer(&next);
                }
                if writer.send(WriterMessage::Snapshot(next)).is_err() {
                    return Err(HomeBudgetError::Storage(
                        "Persistence writer has stopped".into(),
                    ));
                }
                debug!(user = %self.user, action = name, "action applied");
            }
            Outcome::Ignored(reason) => {
                info!(user = %self.user, action = name, %reason, "action ignored");
            }
        }

        Ok(outcome)
    }

    /// The current snapshot
    pub fn snapshot(&self) -> BudgetResult<Arc<AppState>> {
        Ok(Arc::clone(&self.lock()?.state))
    }

    /// Register an observer for future snapshots
    pub fn subscribe<F>(&self, observer: F) -> BudgetResult<()>
    where
        F: Fn(&Arc<AppState>) + Send + 'static,
    {
        self.lock()?.observers.push(Box::new(observer));
        Ok(())
    }

    /// Write any pending snapshot now, without stopping the writer
    pub fn flush(&self) -> BudgetResult<()> {
        let (ack_sender, ack) = mpsc::channel();
        {
            let inner = self.lock()?;
            let Some(writer) = &inner.writer else {
                return Ok(());
            };
            writer
                .send(WriterMessage::Flush(ack_sender))
                .map_err(|_| HomeBudgetError::Storage("Persistence writer has stopped".into()))?;
        }
        ack.recv()
            .map_err(|_| HomeBudgetError::Storage("Persistence writer has stopped".into()))
    }

    /// End the session: flush pending writes and stop the writer
    ///
    /// Further dispatches fail. Calling `close` again is a no-op.
    pub fn close(&self) -> BudgetResult<()> {
        let writer = self.lock()?.writer.take();
        let Some(writer) = writer else {
            return Ok(());
        };
        let _ = writer.send(WriterMessage::Shutdown);

        let handle = self
            .writer_handle
            .lock()
            .map_err(|e| HomeBudgetError::Storage(format!("Failed to acquire lock: {}", e)))?
            .take();
        if let Some(handle) = handle {
            handle
                .join()
                .map_err(|_| HomeBudgetError::Storage("Persistence writer panicked".into()))?;
        }

        info!(user = %self.user, "ledger closed");
        Ok(())
    }

    fn lock(&self) -> BudgetResult<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|e| HomeBudgetError::Storage(format!("Failed to acquire store lock: {}", e)))
    }
}

impl Drop for SnapshotStore {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
