//! Process-level plumbing around the watcher.
//!
//! This module provides:
//! - The supervisor that restarts the poll loop after failures
//! - Signal handling mapped onto a cancellation token
//! - Tracing subscriber setup

mod observability;
mod runner;
mod signals;

pub use observability::init_tracing;
pub use runner::{format_uptime, App};
pub use signals::spawn_signal_listener;
