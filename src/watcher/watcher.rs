//! Polling directory watcher.
//!
//! Each poll cycle lists the watched directory, diffs it against the previous
//! listing, sleeps for the configured interval, then reports the changes and
//! scans every matching file from where the last cycle left off.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::events::{CycleReport, Discovery};
use super::filter::ExtensionFilter;
use super::scanner::scan_file;
use super::snapshot::Snapshot;
use super::stats::WatcherStats;
use crate::{Error, Result};

/// Default time between polls.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// What to watch and what to look for.
#[derive(Debug, Clone)]
pub struct WatchSettings {
    /// Directory to poll (not recursive).
    pub dir: PathBuf,
    /// Substring to report.
    pub magic: String,
    /// File name suffix selecting files to scan.
    pub extension: String,
    /// Sleep between polls.
    pub interval: Duration,
}

impl WatchSettings {
    /// Settings with the default `.txt` extension and one second interval.
    pub fn new(dir: impl Into<PathBuf>, magic: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            magic: magic.into(),
            extension: ".txt".to_string(),
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Directory watcher holding the baseline snapshot between cycles.
///
/// A watcher that returned an error should be dropped; its baseline is no
/// longer meaningful.
#[derive(Debug)]
pub struct DirectoryWatcher {
    settings: WatchSettings,
    filter: ExtensionFilter,
    baseline: Snapshot,
    stats: Arc<WatcherStats>,
}

impl DirectoryWatcher {
    /// Create a watcher and take its initial snapshot.
    ///
    /// Files present now are not reported as added, but they are scanned from
    /// the beginning on the first cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn start(settings: WatchSettings, stats: Arc<WatcherStats>) -> Result<Self> {
        let baseline = Snapshot::take(&settings.dir)?;
        let filter = ExtensionFilter::new(settings.extension.clone());

        tracing::info!(
            path = %settings.dir.display(),
            extension = %settings.extension,
            entries = baseline.len(),
            "Watching directory"
        );

        Ok(Self {
            settings,
            filter,
            baseline,
            stats,
        })
    }

    /// Snapshot the next cycle will diff against.
    #[must_use]
    pub const fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    #[must_use]
    pub const fn settings(&self) -> &WatchSettings {
        &self.settings
    }

    /// Poll until `token` is cancelled.
    ///
    /// Cancellation is only checked between cycles, so a cycle that is
    /// sleeping or scanning when the token fires still runs to completion.
    ///
    /// # Errors
    ///
    /// Returns the first listing or scanning error encountered.
    pub async fn run(&mut self, token: &CancellationToken) -> Result<()> {
        while !token.is_cancelled() {
            self.poll_cycle().await?;
        }

        tracing::debug!(path = %self.settings.dir.display(), "Poll loop stopped");
        Ok(())
    }

    /// Run a single poll cycle: snapshot, diff, sleep, report, scan.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or a matching file
    /// cannot be read.
    pub async fn poll_cycle(&mut self) -> Result<CycleReport> {
        let current = Snapshot::take(&self.settings.dir)?;
        let diff = Snapshot::diff(&self.baseline, &current);

        tokio::time::sleep(self.settings.interval).await;

        let mut report = CycleReport::from_diff(diff);
        if !report.added.is_empty() {
            tracing::info!(files = %report.added_list(), "File(s) added");
        }
        if !report.removed.is_empty() {
            tracing::info!(files = %report.removed_list(), "File(s) removed");
        }

        let previous = std::mem::take(&mut self.baseline);
        let filter = self.filter.clone();
        let magic = self.settings.magic.clone();
        let (next, scanned, discoveries) =
            tokio::task::spawn_blocking(move || scan_pass(&previous, current, &filter, &magic))
                .await
                .map_err(|e| Error::internal(format!("scan task failed: {e}")))??;

        for found in &discoveries {
            tracing::info!(
                path = %found.path.display(),
                line = found.line_number,
                text = %found.text.trim(),
                "Match on line {}",
                found.line_number
            );
        }

        self.baseline = next;
        report.scanned = scanned;
        report.discoveries = discoveries;
        self.stats.record_cycle(&report);

        tracing::debug!(
            entries = self.baseline.len(),
            scanned = report.scanned,
            matches = report.discoveries.len(),
            "Poll cycle complete"
        );

        Ok(report)
    }
}

/// Scan every matching entry of `current`, resuming from the cursors in
/// `previous`. Entries that do not match keep their placeholder cursor.
fn scan_pass(
    previous: &Snapshot,
    mut current: Snapshot,
    filter: &ExtensionFilter,
    magic: &str,
) -> Result<(Snapshot, usize, Vec<Discovery>)> {
    let targets: Vec<PathBuf> = current
        .paths()
        .filter(|p| filter.should_scan(p))
        .cloned()
        .collect();

    let mut discoveries = Vec::new();
    for path in &targets {
        let cursor = previous.cursor(path).unwrap_or_default();
        let (next, matches) = scan_file(path, cursor, magic)?;
        discoveries.extend(matches.into_iter().map(|m| Discovery {
            path: path.clone(),
            line_number: m.line_number,
            text: m.text,
        }));
        current.insert(path.clone(), next);
    }

    Ok((current, targets.len(), discoveries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watcher::ScanCursor;
    use std::fs;
    use tempfile::TempDir;

    fn settings(dir: &std::path::Path) -> WatchSettings {
        WatchSettings {
            interval: Duration::from_millis(10),
            ..WatchSettings::new(dir, "magic")
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = WatchSettings::new("/tmp", "magic");
        assert_eq!(settings.extension, ".txt");
        assert_eq!(settings.interval, DEFAULT_INTERVAL);
    }

    #[test]
    fn test_start_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let result =
            DirectoryWatcher::start(settings(&tmp.path().join("nope")), WatcherStats::new());
        assert!(result.unwrap_err().is_directory_not_found());
    }

    #[test]
    fn test_scan_pass_carries_cursors_forward() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.txt");
        fs::write(&path, "old magic\nnew magic\n").unwrap();

        let previous: Snapshot = [(path.clone(), ScanCursor::new(10, 2))]
            .into_iter()
            .collect();
        let current = Snapshot::take(tmp.path()).unwrap();
        let filter = ExtensionFilter::new(".txt");

        let (next, scanned, discoveries) = scan_pass(&previous, current, &filter, "magic").unwrap();

        assert_eq!(scanned, 1);
        assert_eq!(discoveries.len(), 1);
        assert_eq!(discoveries[0].line_number, 2);
        assert_eq!(discoveries[0].text, "new magic");
        assert_eq!(next.cursor(&path), Some(ScanCursor::new(20, 3)));
    }

    #[test]
    fn test_scan_pass_leaves_other_files_alone() {
        let tmp = TempDir::new().unwrap();
        let bak = tmp.path().join("note.txt.bak");
        fs::write(&bak, "magic\n").unwrap();
        fs::create_dir(tmp.path().join("dir.txt")).unwrap();

        let current = Snapshot::take(tmp.path()).unwrap();
        let filter = ExtensionFilter::new(".txt");

        let (next, scanned, discoveries) =
            scan_pass(&Snapshot::new(), current, &filter, "magic").unwrap();

        assert_eq!(scanned, 0);
        assert!(discoveries.is_empty());
        assert_eq!(next.cursor(&bak), Some(ScanCursor::default()));
    }

    #[tokio::test]
    async fn test_poll_cycle_reports_existing_file_matches() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "magic here\n").unwrap();

        let mut watcher =
            DirectoryWatcher::start(settings(tmp.path()), WatcherStats::new()).unwrap();
        let report = watcher.poll_cycle().await.unwrap();

        assert!(report.added.is_empty());
        assert_eq!(report.scanned, 1);
        assert_eq!(report.discoveries.len(), 1);

        let report = watcher.poll_cycle().await.unwrap();
        assert!(report.is_quiet());
    }

    #[tokio::test]
    async fn test_run_returns_immediately_when_cancelled() {
        let tmp = TempDir::new().unwrap();
        let stats = WatcherStats::new();
        let mut watcher =
            DirectoryWatcher::start(settings(tmp.path()), Arc::clone(&stats)).unwrap();

        let token = CancellationToken::new();
        token.cancel();
        watcher.run(&token).await.unwrap();

        assert_eq!(stats.snapshot().cycles, 0);
    }

    #[tokio::test]
    async fn test_run_fails_when_dir_disappears() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("watched");
        fs::create_dir(&dir).unwrap();

        let mut watcher = DirectoryWatcher::start(settings(&dir), WatcherStats::new()).unwrap();
        fs::remove_dir(&dir).unwrap();

        let err = watcher.run(&CancellationToken::new()).await.unwrap_err();
        assert!(err.is_directory_not_found());
    }
}
