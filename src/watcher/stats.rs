//! Counters describing watcher activity over the life of the process.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::events::CycleReport;

/// Statistics for directory watching.
#[derive(Debug, Default)]
pub struct WatcherStats {
    pub cycles: AtomicU64,
    pub files_added: AtomicU64,
    pub files_removed: AtomicU64,
    pub files_scanned: AtomicU64,
    pub matches: AtomicU64,
    pub restarts: AtomicU64,
}

impl WatcherStats {
    /// Create new stats tracker.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fold one cycle's results into the counters.
    pub fn record_cycle(&self, report: &CycleReport) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
        self.files_added
            .fetch_add(report.added.len() as u64, Ordering::Relaxed);
        self.files_removed
            .fetch_add(report.removed.len() as u64, Ordering::Relaxed);
        self.files_scanned
            .fetch_add(report.scanned as u64, Ordering::Relaxed);
        self.matches
            .fetch_add(report.discoveries.len() as u64, Ordering::Relaxed);
    }

    /// Count a supervisor restart.
    pub fn record_restart(&self) {
        self.restarts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of current stats.
    #[must_use]
    pub fn snapshot(&self) -> WatcherStatsSnapshot {
        WatcherStatsSnapshot {
            cycles: self.cycles.load(Ordering::Relaxed),
            files_added: self.files_added.load(Ordering::Relaxed),
            files_removed: self.files_removed.load(Ordering::Relaxed),
            files_scanned: self.files_scanned.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            restarts: self.restarts.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of watcher stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatcherStatsSnapshot {
    pub cycles: u64,
    pub files_added: u64,
    pub files_removed: u64,
    pub files_scanned: u64,
    pub matches: u64,
    pub restarts: u64,
}
