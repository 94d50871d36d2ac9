//! dirwatcher library
//!
//! Polls a directory, reports files added and removed between polls, and
//! incrementally scans matching files for a magic string.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod config;
pub mod error;
pub mod watcher;

pub use config::Config;
pub use error::{Error, Result};
