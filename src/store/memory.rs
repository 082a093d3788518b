//! In-memory archive store for tests and ephemeral sessions.

use crate::archive::Snapshot;
use crate::store::{ArchiveStore, StoreError};
use std::sync::{Arc, Mutex};

/// Clones share the same backing state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    snapshots: Vec<Snapshot>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshots(snapshots: Vec<Snapshot>) -> Self {
        let store = Self::new();
        store.lock().snapshots = snapshots;
        store
    }

    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// What a fresh `load` would return, ignoring `fail_reads`.
    pub fn persisted(&self) -> Vec<Snapshot> {
        self.lock().snapshots.clone()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A poisoned lock only means a test panicked mid-write.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ArchiveStore for MemoryStore {
    fn load(&self) -> Result<Vec<Snapshot>, StoreError> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        Ok(inner.snapshots.clone())
    }

    fn save(&self, snapshots: &[Snapshot]) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        inner.snapshots = snapshots.to_vec();
        inner.writes += 1;
        Ok(())
    }
}
