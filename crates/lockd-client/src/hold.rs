//! Client-mode workflow: acquire a lock, hold it, release on exit.
//!
//! The hold phase is a cancellable wait rather than an ad hoc signal
//! handler: a termination signal ends the wait early, and the release
//! runs on every exit path (normal elapse or cancellation).

use std::time::Duration;

use tracing::{info, warn};

use crate::error::Result;
use crate::http::LockdHttpClient;

/// Settings for one hold cycle.
#[derive(Clone, Debug)]
pub struct HoldConfig {
    /// Lock name to acquire.
    pub name: String,
    /// Owner token sent with acquire and release.
    pub owner: String,
    /// Lease duration requested from the server.
    pub lease: Duration,
    /// How long to hold the lock before releasing it.
    pub hold: Duration,
}

/// Acquire the configured lock, hold it, then release it.
///
/// The acquire is a single attempt: a denial or transport failure is
/// returned to the caller, which decides on retry or exit. A failed
/// release during shutdown is logged at warn level and not escalated,
/// since the process is exiting regardless and the lease will lapse on
/// its own.
pub async fn run(client: &LockdHttpClient, config: &HoldConfig) -> Result<()> {
    client.acquire(&config.name, &config.owner, config.lease).await?;
    info!(
        name = %config.name,
        owner = %config.owner,
        hold_secs = config.hold.as_secs(),
        "lock acquired, holding"
    );

    tokio::select! {
        _ = tokio::time::sleep(config.hold) => {
            info!(name = %config.name, "hold interval elapsed, releasing");
        }
        _ = termination_signal() => {
            info!(name = %config.name, "termination signal received, releasing early");
        }
    }

    if let Err(e) = client.release(&config.name, &config.owner).await {
        warn!(name = %config.name, error = %e, "best-effort release failed");
    }
    Ok(())
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn termination_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
