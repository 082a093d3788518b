//! Defines `Snapshot`, a frozen copy of the field store.

use crate::composer;
use crate::fields::{FieldKey, FieldStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Opaque, monotonically increasing snapshot identifier (epoch millis at
/// creation, bumped on collisions).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SnapshotId(pub u64);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SnapshotId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(SnapshotId)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: SnapshotId,
    pub name: String,
    #[serde(default)]
    pub composed_text: String,
    #[serde(default)]
    pub fields: BTreeMap<FieldKey, String>,
    #[serde(default)]
    pub labels: BTreeMap<FieldKey, String>,
}

impl Snapshot {
    /// Deep-copies texts, labels and the current composed output.
    pub fn capture(id: SnapshotId, name: impl Into<String>, store: &FieldStore) -> Self {
        Self {
            id,
            name: name.into(),
            composed_text: composer::compose(store),
            fields: store.texts(),
            labels: store.labels(),
        }
    }

    /// Overwrites `store` with this snapshot and clears its flags.
    pub fn restore_into(&self, store: &mut FieldStore) {
        store.apply_snapshot(&self.fields, &self.labels);
    }
}
