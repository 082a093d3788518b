//! High-level archive logic: save, load, rename, delete, export, import.

use crate::archive::snapshot::{Snapshot, SnapshotId};
use crate::archive::ArchiveError;
use crate::fields::FieldStore;
use crate::store::ArchiveStore;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Ordered newest first. Every mutation is written through `store`.
pub struct SnapshotArchive<S: ArchiveStore> {
    snapshots: Vec<Snapshot>,
    store: S,
    last_issued: u64,
}

impl<S: ArchiveStore> SnapshotArchive<S> {
    /// Loads the persisted archive. Read failures leave it empty.
    #[instrument(skip(store))]
    pub fn open(store: S) -> Self {
        let snapshots = match store.load() {
            Ok(snapshots) => {
                debug!(count = snapshots.len(), "Loaded snapshot archive");
                snapshots
            }
            Err(e) => {
                warn!("Could not read snapshot archive, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            snapshots,
            store,
            last_issued: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, id: SnapshotId) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.id == id)
    }

    /// Captures `fields` as `Untitled<N>`, N being the archive length + 1.
    pub fn save(&mut self, fields: &FieldStore) -> Snapshot {
        let id = self.next_id();
        let name = format!("Untitled{}", self.snapshots.len() + 1);
        let snapshot = Snapshot::capture(id, name, fields);

        self.snapshots.insert(0, snapshot.clone());
        info!(id = %snapshot.id, name = %snapshot.name, "Saved snapshot");
        self.persist();
        snapshot
    }

    /// The caller applies the result with [`Snapshot::restore_into`], which
    /// also resets the hidden/deleted flags.
    pub fn load(&self, id: SnapshotId) -> Option<&Snapshot> {
        let found = self.get(id);
        if found.is_none() {
            debug!(%id, "Load of unknown snapshot ignored");
        }
        found
    }

    pub fn rename(&mut self, id: SnapshotId, name: impl Into<String>) {
        let Some(snapshot) = self.snapshots.iter_mut().find(|s| s.id == id) else {
            debug!(%id, "Rename of unknown snapshot ignored");
            return;
        };
        snapshot.name = name.into();
        self.persist();
    }

    pub fn delete(&mut self, id: SnapshotId) {
        let before = self.snapshots.len();
        self.snapshots.retain(|s| s.id != id);
        if self.snapshots.len() == before {
            debug!(%id, "Delete of unknown snapshot ignored");
            return;
        }
        info!(%id, "Deleted snapshot");
        self.persist();
    }

    /// Pretty-printed JSON array of every snapshot.
    pub fn export_all(&self) -> Result<Vec<u8>, ArchiveError> {
        serde_json::to_vec_pretty(&self.snapshots).map_err(ArchiveError::Export)
    }

    /// Parses `bytes` and prepends the snapshots in file order. Nothing is
    /// touched when parsing fails. Ids already present are re-keyed.
    pub fn import_all(&mut self, bytes: &[u8]) -> Result<usize, ArchiveError> {
        let mut imported: Vec<Snapshot> =
            serde_json::from_slice(bytes).map_err(ArchiveError::Import)?;

        let mut seen: HashSet<SnapshotId> = self.snapshots.iter().map(|s| s.id).collect();
        for snapshot in &mut imported {
            if !seen.insert(snapshot.id) {
                let fresh = self.fresh_id(&seen);
                debug!(old = %snapshot.id, new = %fresh, "Re-keyed colliding import");
                snapshot.id = fresh;
                seen.insert(fresh);
            }
        }

        let count = imported.len();
        imported.append(&mut self.snapshots);
        self.snapshots = imported;
        info!(count, "Imported snapshots");
        self.persist();
        Ok(count)
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.snapshots) {
            warn!("Could not persist snapshot archive: {}", e);
        }
    }

    fn next_id(&mut self) -> SnapshotId {
        let taken: HashSet<SnapshotId> = self.snapshots.iter().map(|s| s.id).collect();
        self.fresh_id(&taken)
    }

    /// Above every id in `taken` and every id issued so far. Once the id
    /// space is exhausted at `u64::MAX`, falls back to the highest free id.
    fn fresh_id(&mut self, taken: &HashSet<SnapshotId>) -> SnapshotId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let newest = taken.iter().map(|id| id.0).max().unwrap_or(0);
        let candidate = now
            .max(newest.saturating_add(1))
            .max(self.last_issued.saturating_add(1));
        self.last_issued = candidate;

        if !taken.contains(&SnapshotId(candidate)) {
            return SnapshotId(candidate);
        }
        let id = (0..u64::MAX)
            .rev()
            .map(SnapshotId)
            .find(|id| !taken.contains(id))
            .unwrap_or(SnapshotId(u64::MAX));
        warn!(%id, "Snapshot id space exhausted, reusing a free id");
        id
    }
}

/// `prompt-builder-<epoch millis>.json`
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("prompt-builder-{}.json", at.timestamp_millis())
}
