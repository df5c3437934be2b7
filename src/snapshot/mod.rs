// src/snapshot/mod.rs

//! Point-in-time views of the watched directory.
//!
//! - [`capture`] lists the directory (optionally recursively) and sums the
//!   sizes of its immediate entries.
//! - [`diff`] compares two snapshots into a [`ChangeSet`].
//!
//! Entries are stored relative to the watched directory and kept in a
//! sorted set, so two captures of an unchanged directory compare equal and
//! diffs come out in a deterministic order.

pub mod capture;
pub mod diff;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub use capture::capture;
pub use diff::{diff, ChangeSet};

/// Immutable record of a directory's contents at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    taken_at: SystemTime,
    entries: BTreeSet<PathBuf>,
    total_size: u64,
}

impl Snapshot {
    /// Build a snapshot from already-collected entries, stamped with the
    /// current time.
    pub fn new<I, P>(entries: I, total_size: u64) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            taken_at: SystemTime::now(),
            entries: entries.into_iter().map(Into::into).collect(),
            total_size,
        }
    }

    /// An empty snapshot with the given aggregate size.
    pub fn with_size(total_size: u64) -> Self {
        Self::new(Vec::<PathBuf>::new(), total_size)
    }

    pub fn taken_at(&self) -> SystemTime {
        self.taken_at
    }

    /// Entry paths, relative to the watched directory, in sorted order.
    pub fn entries(&self) -> &BTreeSet<PathBuf> {
        &self.entries
    }

    pub fn contains(&self, entry: impl AsRef<Path>) -> bool {
        self.entries.contains(entry.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the byte sizes of the directory's immediate entries.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// True if both snapshots list the same entries (timestamps and sizes
    /// are ignored).
    pub fn same_entries(&self, other: &Snapshot) -> bool {
        self.entries == other.entries
    }
}
