//! Persistence port for the snapshot archive.
//!
//! The archive only ever sees [`ArchiveStore`]; production code injects a
//! [`FileStore`], tests inject a [`MemoryStore`].

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::archive::Snapshot;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored archive is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub trait ArchiveStore {
    /// Reads the whole archive. An absent document is an empty archive.
    fn load(&self) -> Result<Vec<Snapshot>, StoreError>;

    /// Replaces the persisted archive with `snapshots`.
    fn save(&self, snapshots: &[Snapshot]) -> Result<(), StoreError>;
}
