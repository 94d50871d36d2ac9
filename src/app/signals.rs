//! Maps process signals onto a cancellation token.

use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::Result;

/// Cancel `token` whenever SIGINT (Ctrl+C) or SIGTERM arrives.
///
/// Handlers are registered before this returns, so a failure to install them
/// surfaces here rather than inside the listener task. Repeated signals are
/// logged and otherwise ignored; the poll loop stops at its next cycle
/// boundary.
///
/// # Errors
///
/// Returns an error if the SIGTERM handler cannot be installed.
pub fn spawn_signal_listener(token: CancellationToken) -> Result<JoinHandle<()>> {
    #[cfg(unix)]
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        loop {
            #[cfg(unix)]
            let terminate = async {
                sigterm.recv().await;
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                result = signal::ctrl_c() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                        return;
                    }
                    tracing::warn!("Received SIGINT");
                }
                () = terminate => {
                    tracing::warn!("Received SIGTERM");
                }
            }

            if token.is_cancelled() {
                tracing::debug!("Shutdown already requested");
            } else {
                tracing::info!("Stopping after the current poll cycle");
                token.cancel();
            }
        }
    }))
}
