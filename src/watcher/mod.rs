//! Directory polling and incremental magic-string scanning.
//!
//! This module provides:
//! - Single-level directory snapshots and diffs
//! - Extension filtering of snapshot entries
//! - Resumable per-file scans driven by byte/line cursors
//! - The poll loop tying them together

mod events;
mod filter;
mod scanner;
mod snapshot;
mod stats;
#[allow(clippy::module_inception)]
mod watcher;

pub use events::{CycleReport, Discovery};
pub use filter::ExtensionFilter;
pub use scanner::{scan_file, LineMatch};
pub use snapshot::{resolve_dir, ScanCursor, Snapshot, SnapshotDiff};
pub use stats::{WatcherStats, WatcherStatsSnapshot};
pub use watcher::{DirectoryWatcher, WatchSettings, DEFAULT_INTERVAL};
