//! Storage layer for HomeBudget
//!
//! Snapshot persistence behind the [`SnapshotPersistence`] trait: a JSON
//! file backend with atomic writes and an in-memory backend.

pub mod file_io;
pub mod persistence;
pub mod snapshots;

pub use file_io::{read_json_optional, write_json_atomic};
pub use persistence::{InMemoryPersistence, SnapshotPersistence, UserKey};
pub use snapshots::FileSnapshotStorage;
