//! In-memory implementation of [`SnapshotStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral
//! sessions. It holds the same flat [`Snapshot`] the file backend writes, so
//! save/load round-trips exercise identical codec and linker paths.

use campus_core::Campus;

use crate::convert::decompose;
use crate::error::StorageError;
use crate::link::{recompose, LoadReport};
use crate::record::Snapshot;
use crate::traits::SnapshotStore;

/// Snapshot storage that never touches disk.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: Snapshot,
}

impl InMemoryStore {
    /// Creates a store holding an empty snapshot.
    pub fn new() -> Self {
        InMemoryStore {
            snapshot: Snapshot::default(),
        }
    }
}

impl SnapshotStore for InMemoryStore {
    fn save_campus(&mut self, campus: &Campus) -> Result<(), StorageError> {
        self.snapshot = decompose(campus);
        Ok(())
    }

    fn load_campus(&self) -> Result<(Campus, LoadReport), StorageError> {
        Ok(recompose(self.snapshot.clone()))
    }
}
