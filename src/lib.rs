//! Prompt builder core: ten labeled sections, a composer that joins the
//! visible ones, and a locally persisted archive of named snapshots.

pub mod archive;
pub mod commands;
pub mod composer;
pub mod config;
pub mod feedback;
pub mod fields;
pub mod links;
pub mod store;

pub use archive::{Snapshot, SnapshotArchive, SnapshotId};
pub use commands::{Action, AppState, Outcome};
pub use composer::{compose, compose_sections, Section};
pub use config::Config;
pub use fields::{FieldKey, FieldStore};
pub use store::{ArchiveStore, FileStore, MemoryStore};
