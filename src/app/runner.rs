//! Supervisor around the poll loop.
//!
//! Any failure inside the loop is logged, followed by a pause, after which
//! watching restarts from a fresh snapshot. All scan cursors are discarded on
//! restart, so matches already reported may be reported again.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio_util::sync::CancellationToken;

use crate::watcher::{resolve_dir, DirectoryWatcher, WatcherStats};
use crate::{Config, Error, Result};

/// The watcher application.
pub struct App {
    config: Config,
    stats: Arc<WatcherStats>,
}

impl App {
    /// Create a new application.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stats: WatcherStats::new(),
        }
    }

    /// Shared activity counters.
    #[must_use]
    pub fn stats(&self) -> Arc<WatcherStats> {
        Arc::clone(&self.stats)
    }

    /// Watch until `token` is cancelled, restarting after every failure.
    pub async fn run(self, token: CancellationToken) {
        let started = Local::now();
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            path = %self.config.watch_dir.display(),
            magic = %self.config.magic,
            extension = %self.config.extension,
            interval_secs = self.config.interval.as_secs_f64(),
            started = %started.to_rfc3339(),
            "dirwatcher started"
        );

        while !token.is_cancelled() {
            match self.watch(&token).await {
                Ok(()) => break,
                Err(e) => {
                    self.log_failure(&e);
                    self.stats.record_restart();
                    pause(self.config.restart_delay, &token).await;
                }
            }
        }

        let stopped = Local::now();
        let stats = self.stats.snapshot();
        tracing::info!(
            stopped = %stopped.to_rfc3339(),
            uptime = %format_uptime(stopped - started),
            cycles = stats.cycles,
            matches = stats.matches,
            restarts = stats.restarts,
            "dirwatcher stopped"
        );
    }

    async fn watch(&self, token: &CancellationToken) -> Result<()> {
        let mut watcher =
            DirectoryWatcher::start(self.config.watch_settings(), Arc::clone(&self.stats))?;
        watcher.run(token).await
    }

    /// The watched directory as an absolute path, for log output.
    fn watched_path(&self) -> PathBuf {
        resolve_dir(&self.config.watch_dir).unwrap_or_else(|_| self.config.watch_dir.clone())
    }

    fn log_failure(&self, err: &Error) {
        let delay = self.config.restart_delay.as_secs_f64();
        match err {
            e if e.is_directory_not_found() => {
                tracing::error!(
                    path = %self.watched_path().display(),
                    retry_in_secs = delay,
                    "Directory not found"
                );
            }
            Error::Watcher(_) | Error::Io(_) => {
                tracing::error!(error = %err, retry_in_secs = delay, "Watch failed, restarting");
            }
            _ => {
                tracing::error!(
                    error = ?err,
                    retry_in_secs = delay,
                    "Unhandled error in watch loop, restarting"
                );
            }
        }
    }
}

/// Sleep for `delay`, returning early if `token` is cancelled.
async fn pause(delay: Duration, token: &CancellationToken) {
    tokio::select! {
        () = tokio::time::sleep(delay) => {}
        () = token.cancelled() => {}
    }
}

/// Render an uptime as `H:MM:SS.ffffff`, prefixed with days when over a day.
#[must_use]
pub fn format_uptime(uptime: chrono::Duration) -> String {
    let total_micros = uptime.num_microseconds().unwrap_or(i64::MAX).max(0);
    let micros = total_micros % 1_000_000;
    let total_secs = total_micros / 1_000_000;

    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    let clock = format!("{hours}:{minutes:02}:{seconds:02}.{micros:06}");
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}
