//! Debounced persistence writer
//!
//! A background thread that receives every published snapshot, keeps only
//! the latest one, and saves it once the channel has been quiet for the
//! debounce interval. Failed saves are retried after another quiet period.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::error::{BudgetResult, HomeBudgetError};
use crate::models::AppState;
use crate::storage::{SnapshotPersistence, UserKey};

/// Messages understood by the writer thread
pub(crate) enum WriterMessage {
    /// A new snapshot replaces whatever is pending
    Snapshot(Arc<AppState>),
    /// Save the pending snapshot now and acknowledge
    Flush(mpsc::Sender<()>),
    /// Save the pending snapshot now and stop
    Shutdown,
}

/// Timing and retry policy of the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Quiet period before a pending snapshot is written
    pub debounce: Duration,
    /// Extra attempts after a failed save before the snapshot is dropped
    pub retries: u32,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            retries: 3,
        }
    }
}

/// Spawn the writer thread for one user
pub(crate) fn spawn(
    user: UserKey,
    persistence: Arc<dyn SnapshotPersistence>,
    options: WriterOptions,
) -> BudgetResult<(mpsc::Sender<WriterMessage>, thread::JoinHandle<()>)> {
    let (sender, receiver) = mpsc::channel();
    let handle = thread::Builder::new()
        .name(format!("homebudget-writer-{}", user.file_stem()))
        .spawn(move || {
            PersistenceWriter {
                user,
                persistence,
                options,
                pending: None,
                failed_attempts: 0,
            }
            .run(receiver)
        })
        .map_err(|e| HomeBudgetError::Io(format!("Failed to start persistence writer: {}", e)))?;

    Ok((sender, handle))
}

struct PersistenceWriter {
    user: UserKey,
    persistence: Arc<dyn SnapshotPersistence>,
    options: WriterOptions,
    pending: Option<Arc<AppState>>,
    failed_attempts: u32,
}

impl PersistenceWriter {
    fn run(mut self, receiver: mpsc::Receiver<WriterMessage>) {
        loop {
            let message = if self.pending.is_some() {
                match receiver.recv_timeout(self.options.debounce) {
                    Ok(message) => Some(message),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            } else {
                match receiver.recv() {
                    Ok(message) => Some(message),
                    Err(_) => break,
                }
            };

            match message {
                Some(WriterMessage::Snapshot(state)) => {
                    self.pending = Some(state);
                    self.failed_attempts = 0;
                }
                Some(WriterMessage::Flush(ack)) => {
                    self.flush_now();
                    let _ = ack.send(());
                }
                Some(WriterMessage::Shutdown) => break,
                None => self.save_pending(),
            }
        }

        self.flush_now();
        debug!(user = %self.user, "persistence writer stopped");
    }

    /// Quiet period elapsed: one attempt, rescheduled on failure
    fn save_pending(&mut self) {
        let Some(state) = self.pending.take() else {
            return;
        };

        match self.persistence.save(&self.user, &state) {
            Ok(()) => {
                debug!(user = %self.user, "snapshot saved");
                self.failed_attempts = 0;
            }
            Err(e) => {
                self.failed_attempts += 1;
                if self.failed_attempts > self.options.retries {
                    error!(
                        user = %self.user,
                        attempts = self.failed_attempts,
                        "giving up on snapshot save: {}", e
                    );
                    self.failed_attempts = 0;
                } else {
                    warn!(
                        user = %self.user,
                        attempt = self.failed_attempts,
                        "snapshot save failed, will retry: {}", e
                    );
                    self.pending = Some(state);
                }
            }
        }
    }

    /// Save whatever is pending without waiting, using the remaining retries
    fn flush_now(&mut self) {
        while self.pending.is_some() {
            self.save_pending();
        }
    }
}
