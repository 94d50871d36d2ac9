//! dirwatcher - watch a directory of text files for a magic string
//!
//! Entry point for the command-line tool.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use dirwatcher::app::{init_tracing, spawn_signal_listener, App};
use dirwatcher::config::seconds;
use dirwatcher::{Config, Result};
use tokio_util::sync::CancellationToken;

/// Watches a directory of text files for a magic string
#[derive(Parser, Debug)]
#[command(name = "dirwatcher")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory path to watch
    path: std::path::PathBuf,

    /// String to watch for
    magic: String,

    /// Text file extension to watch e.g. .txt, .log
    #[arg(short, long, env = "DIRWATCHER_EXT", default_value = ".txt")]
    ext: String,

    /// Number of seconds between polling
    #[arg(short, long, env = "DIRWATCHER_INTERVAL", default_value = "1.0")]
    interval: f64,

    /// Seconds to wait before restarting after an error
    #[arg(long, env = "DIRWATCHER_RESTART_DELAY", default_value = "5.0")]
    restart_delay: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DIRWATCHER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = "DIRWATCHER_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        watch_dir: cli.path,
        magic: cli.magic,
        extension: cli.ext,
        interval: seconds(cli.interval)?,
        restart_delay: seconds(cli.restart_delay)?,
        log_level: cli.log_level,
        log_json: cli.log_json,
    };
    config.validate()?;

    init_tracing(&config.log_level, config.log_json);
    tracing::debug!(?config, "Configuration loaded");

    let token = CancellationToken::new();
    let _signals = spawn_signal_listener(token.clone())?;

    App::new(config).run(token).await;
    Ok(())
}
