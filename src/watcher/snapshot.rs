//! Directory snapshots and per-file scan cursors.

#![allow(clippy::missing_const_for_fn)]

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::WatcherError;
use crate::Result;

/// How far into a file the watcher has scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanCursor {
    /// Byte offset where the next scan resumes.
    pub byte_offset: u64,
    /// Line number the next unread line will receive.
    pub line_number: u64,
}

impl ScanCursor {
    /// Cursor at an explicit position.
    #[must_use]
    pub const fn new(byte_offset: u64, line_number: u64) -> Self {
        Self {
            byte_offset,
            line_number,
        }
    }
}

impl Default for ScanCursor {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

/// Entries of the watched directory at one poll instant, each with its cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<PathBuf, ScanCursor>,
}

/// Paths that appeared or disappeared between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    pub added: BTreeSet<PathBuf>,
    pub removed: BTreeSet<PathBuf>,
}

impl SnapshotDiff {
    /// True when nothing was added or removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl Snapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// List the immediate entries of `dir`, each with a fresh cursor.
    ///
    /// The listing is single-level and does not follow symlinks. Files and
    /// subdirectories are both included.
    ///
    /// # Errors
    ///
    /// Returns [`WatcherError::DirectoryNotFound`] if `dir` does not exist and
    /// [`WatcherError::DirectoryAccess`] for any other listing failure.
    pub fn take(dir: &Path) -> Result<Self> {
        let root = resolve_dir(dir)?;
        ensure_directory(&root)?;
        let mut entries = BTreeMap::new();

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in walker {
            let entry = entry.map_err(|e| listing_error(&root, &e))?;
            entries.insert(entry.into_path(), ScanCursor::default());
        }

        tracing::trace!(path = %root.display(), entries = entries.len(), "Took snapshot");
        Ok(Self { entries })
    }

    /// Compare `previous` against `current`.
    #[must_use]
    pub fn diff(previous: &Self, current: &Self) -> SnapshotDiff {
        let added = current
            .paths()
            .filter(|p| !previous.contains(p))
            .cloned()
            .collect();
        let removed = previous
            .paths()
            .filter(|p| !current.contains(p))
            .cloned()
            .collect();

        SnapshotDiff { added, removed }
    }

    /// Cursor recorded for `path`, if tracked.
    #[must_use]
    pub fn cursor(&self, path: &Path) -> Option<ScanCursor> {
        self.entries.get(path).copied()
    }

    /// Record `cursor` for `path`.
    pub fn insert(&mut self, path: PathBuf, cursor: ScanCursor) {
        self.entries.insert(path, cursor);
    }

    /// Whether `path` is tracked.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Tracked paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.keys()
    }

    /// Tracked paths and cursors in sorted order.
    pub fn iter(&self) -> btree_map::Iter<'_, PathBuf, ScanCursor> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PathBuf, ScanCursor)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (PathBuf, ScanCursor)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a PathBuf, &'a ScanCursor);
    type IntoIter = btree_map::Iter<'a, PathBuf, ScanCursor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Resolve `path` against the current directory without touching symlinks.
///
/// # Errors
///
/// Returns [`WatcherError::DirectoryAccess`] if `path` is relative and the
/// working directory cannot be determined.
pub fn resolve_dir(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|e| WatcherError::DirectoryAccess {
        path: path.display().to_string(),
        reason: format!("cannot resolve working directory: {e}"),
    })?;
    Ok(cwd.join(path))
}

fn ensure_directory(root: &Path) -> Result<()> {
    let path = root.display().to_string();
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(WatcherError::DirectoryAccess {
            path,
            reason: "not a directory".to_string(),
        }
        .into()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(WatcherError::DirectoryNotFound { path }.into())
        }
        Err(e) => Err(WatcherError::DirectoryAccess {
            path,
            reason: e.to_string(),
        }
        .into()),
    }
}

fn listing_error(root: &Path, err: &walkdir::Error) -> crate::Error {
    let path = root.display().to_string();
    match err.io_error().map(std::io::Error::kind) {
        Some(ErrorKind::NotFound) if err.depth() == 0 => {
            WatcherError::DirectoryNotFound { path }.into()
        }
        _ => WatcherError::DirectoryAccess {
            path,
            reason: err.to_string(),
        }
        .into(),
    }
}
