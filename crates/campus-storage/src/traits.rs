//! The [`SnapshotStore`] trait defining the storage contract for campus
//! snapshots.
//!
//! Persistence is an all-or-nothing batch operation invoked at well-defined
//! checkpoints: load at startup, save at shutdown. All backends
//! (InMemoryStore, FlatFileStore) implement this trait, so they are fully
//! swappable without changing core logic. The trait is synchronous -- the
//! system has exactly one logical actor.

use campus_core::Campus;

use crate::error::StorageError;
use crate::link::LoadReport;

/// The storage contract for campus snapshots.
pub trait SnapshotStore {
    /// Persists the full store graph as a flat snapshot, replacing whatever
    /// the backend held before.
    fn save_campus(&mut self, campus: &Campus) -> Result<(), StorageError>;

    /// Loads the snapshot and relinks it into a live campus.
    ///
    /// A backend with nothing saved yet yields an empty campus. The
    /// [`LoadReport`] lists any records skipped over dangling references.
    fn load_campus(&self) -> Result<(Campus, LoadReport), StorageError>;
}
