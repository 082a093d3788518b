//! Snapshot archive: named, frozen copies of the field store, persisted
//! through an injected [`ArchiveStore`](crate::store::ArchiveStore).

pub mod manager;
pub mod snapshot;

pub use manager::{export_file_name, SnapshotArchive};
pub use snapshot::{Snapshot, SnapshotId};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Import failed, file is not a snapshot archive: {0}")]
    Import(#[source] serde_json::Error),
    #[error("Export failed: {0}")]
    Export(#[source] serde_json::Error),
}
