//! Background sweep of expired lease entries.
//!
//! The lock manager already treats stale entries as absent on every
//! read path; this task only reclaims the memory they occupy so a table
//! of long-dead names does not grow without bound.

use std::sync::Arc;
use std::time::Duration;

use lockd_core::LockManager;
use tracing::debug;

/// Start a background task that periodically purges expired leases.
/// Returns a handle that can be used to abort the task on shutdown.
pub fn start_sweep_task(
    manager: Arc<LockManager>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let removed = manager.purge_expired();
            if removed > 0 {
                debug!(removed, "stale lease sweep completed");
            }
        }
    })
}
