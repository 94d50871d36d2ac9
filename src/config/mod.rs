//! Configuration management for dirwatcher.
//!
//! Supports configuration from:
//! - Command-line arguments (highest priority)
//! - Environment variables

mod settings;

pub use settings::{seconds, Config, DEFAULT_RESTART_DELAY};
