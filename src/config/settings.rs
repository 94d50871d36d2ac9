//! Configuration settings and validation.

use std::path::PathBuf;
use std::time::Duration;

use crate::watcher::{WatchSettings, DEFAULT_INTERVAL};
use crate::{Error, Result};

/// Pause before the supervisor restarts a failed poll loop.
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_secs(5);

/// Main configuration for dirwatcher.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory to watch.
    pub watch_dir: PathBuf,

    /// Substring to search for.
    pub magic: String,

    /// File name suffix of files to scan.
    pub extension: String,

    /// Time between polls.
    pub interval: Duration,

    /// Pause before restarting after a failure.
    pub restart_delay: Duration,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watch_dir: PathBuf::from("."),
            magic: String::new(),
            extension: ".txt".to_string(),
            interval: DEFAULT_INTERVAL,
            restart_delay: DEFAULT_RESTART_DELAY,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Create a configuration for `watch_dir` and `magic` with defaults.
    pub fn new(watch_dir: impl Into<PathBuf>, magic: impl Into<String>) -> Self {
        Self {
            watch_dir: watch_dir.into(),
            magic: magic.into(),
            ..Self::default()
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.watch_dir.as_os_str().is_empty() {
            return Err(Error::config("watch directory cannot be empty"));
        }

        if self.magic.is_empty() {
            return Err(Error::config("magic string cannot be empty"));
        }

        if self.extension.is_empty() {
            return Err(Error::config("extension cannot be empty"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Settings for the directory watcher.
    #[must_use]
    pub fn watch_settings(&self) -> WatchSettings {
        WatchSettings {
            dir: self.watch_dir.clone(),
            magic: self.magic.clone(),
            extension: self.extension.clone(),
            interval: self.interval,
        }
    }
}

/// Convert a number of seconds from the command line into a `Duration`.
///
/// # Errors
///
/// Returns an error for negative, NaN or infinite values.
pub fn seconds(value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .map_err(|e| Error::config(format!("invalid duration '{value}': {e}")))
}
