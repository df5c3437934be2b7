// src/snapshot/capture.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::errors::{MonitdirError, Result};
use crate::fs::FileSystem;
use crate::snapshot::Snapshot;

/// Capture a snapshot of `directory`.
///
/// - Non-recursive: every immediate entry is listed, subdirectories included.
/// - Recursive: the whole subtree is walked and only non-directory entries
///   are listed. Symlinked directories are neither listed nor followed.
///
/// `total_size` is always the sum over the immediate entries only.
///
/// Fails with [`MonitdirError::DirectoryAccess`] if the directory itself
/// cannot be resolved or listed. Nested directories that vanish or become
/// unreadable mid-walk are skipped.
pub fn capture(fs: &dyn FileSystem, directory: &Path, recursive: bool) -> Result<Snapshot> {
    let root = fs
        .canonicalize(directory)
        .map_err(|source| access_error(directory, source))?;
    let immediate = fs
        .read_dir(&root)
        .map_err(|source| access_error(&root, source))?;

    let total_size = immediate_size(fs, &immediate);

    let entries = if recursive {
        walk_files(fs, &root, immediate)
    } else {
        immediate
            .iter()
            .filter_map(|p| relative_to(&root, p))
            .collect()
    };

    let snapshot = Snapshot::new(entries, total_size);
    trace!(
        dir = ?root,
        recursive,
        entries = snapshot.len(),
        total_size,
        "captured snapshot"
    );
    Ok(snapshot)
}

fn access_error(path: &Path, source: anyhow::Error) -> MonitdirError {
    MonitdirError::DirectoryAccess {
        path: path.to_path_buf(),
        source,
    }
}

fn immediate_size(fs: &dyn FileSystem, entries: &[PathBuf]) -> u64 {
    entries
        .iter()
        .map(|p| match fs.entry_size(p) {
            Ok(n) => n,
            Err(e) => {
                // Removed between listing and stat; it will show up in the
                // next diff anyway.
                debug!(path = ?p, error = %e, "entry vanished while measuring");
                0
            }
        })
        .sum()
}

fn walk_files(fs: &dyn FileSystem, root: &Path, immediate: Vec<PathBuf>) -> BTreeSet<PathBuf> {
    let mut files = BTreeSet::new();
    let mut stack = immediate;

    while let Some(path) = stack.pop() {
        if fs.is_dir(&path) {
            if fs.is_symlink(&path) {
                continue;
            }
            match fs.read_dir(&path) {
                Ok(children) => stack.extend(children),
                Err(e) => debug!(dir = ?path, error = %e, "skipping unreadable subdirectory"),
            }
        } else if fs.entry_size(&path).is_err() {
            // Gone since its parent was listed; a vanished directory would
            // otherwise be recorded as a file.
            debug!(path = ?path, "entry vanished during walk");
        } else if let Some(rel) = relative_to(root, &path) {
            files.insert(rel);
        }
    }

    files
}

fn relative_to(root: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(Path::to_path_buf)
}
