// src/snapshot/diff.rs

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::snapshot::Snapshot;

/// Entries added and removed between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: BTreeSet<PathBuf>,
    pub removed: BTreeSet<PathBuf>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Total number of changed entries.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    /// Added entries followed by removed entries.
    pub fn changed(&self) -> impl Iterator<Item = &PathBuf> {
        self.added.iter().chain(self.removed.iter())
    }
}

/// Compare `previous` against `current`.
pub fn diff(previous: &Snapshot, current: &Snapshot) -> ChangeSet {
    ChangeSet {
        added: current
            .entries()
            .difference(previous.entries())
            .cloned()
            .collect(),
        removed: previous
            .entries()
            .difference(current.entries())
            .cloned()
            .collect(),
    }
}
