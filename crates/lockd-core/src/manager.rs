//! The lock manager: single source of truth for lock state.
//!
//! All mutating operations are linearizable: acquire and release run
//! their check-then-write sequence as one critical section under the
//! write half of the table lock, so concurrent acquirers racing for the
//! same free or expired name can never both succeed. Listing takes only
//! the read half and may run concurrently with other listings.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use crate::model::{AcquireOutcome, ActiveLock, Lease, ReleaseOutcome};

/// Leases beyond this are clamped so `Instant` arithmetic cannot overflow.
const LEASE_CEILING: Duration = Duration::from_secs(u32::MAX as u64);

/// In-memory lease table mapping lock name to at most one lease.
///
/// The table is process-wide state with no persistence; a restart
/// clears all locks. There is no ambient singleton: the owner creates
/// one `LockManager` at startup and passes it wherever it is needed.
pub struct LockManager {
    locks: RwLock<HashMap<String, Lease>>,
}

impl LockManager {
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Try to take or renew the lease on `name` for `owner`.
    ///
    /// Succeeds when the name is free, the existing lease has expired,
    /// or the existing lease already belongs to `owner` (re-entrant
    /// renewal is always permitted regardless of remaining time).
    /// Otherwise returns `Denied` with the time left on the live lease.
    pub fn try_acquire(&self, name: &str, owner: &str, lease_duration: Duration) -> AcquireOutcome {
        self.try_acquire_at(name, owner, lease_duration, Instant::now())
    }

    pub fn try_acquire_at(
        &self,
        name: &str,
        owner: &str,
        lease_duration: Duration,
        now: Instant,
    ) -> AcquireOutcome {
        let mut locks = self.locks.write();

        if let Some(existing) = locks.get(name) {
            if existing.owner != owner && !existing.is_expired_at(now) {
                return AcquireOutcome::Denied {
                    remaining: existing.expires_at - now,
                };
            }
        }

        locks.insert(
            name.to_string(),
            Lease {
                owner: owner.to_string(),
                expires_at: now + lease_duration.min(LEASE_CEILING),
            },
        );
        debug!(name, owner, lease_secs = lease_duration.as_secs(), "lease granted");
        AcquireOutcome::Granted
    }

    /// Release the lease on `name` held by `owner`.
    ///
    /// Releasing a name nobody holds succeeds (idempotent). Releasing a
    /// name held by someone else returns `Forbidden` and leaves the
    /// table unmodified. The owner check is not time-aware: an owner may
    /// release its own lease even after expiry, as long as nobody else
    /// has acquired the name since (which would have changed the owner).
    pub fn release(&self, name: &str, owner: &str) -> ReleaseOutcome {
        let mut locks = self.locks.write();

        match locks.get(name) {
            Some(existing) if existing.owner != owner => ReleaseOutcome::Forbidden {
                owner: existing.owner.clone(),
            },
            Some(_) => {
                locks.remove(name);
                debug!(name, owner, "lease released");
                ReleaseOutcome::Released
            }
            None => ReleaseOutcome::Released,
        }
    }

    /// Every non-expired lease, sorted by lock name ascending.
    ///
    /// The ordering is a contract, not an implementation detail: callers
    /// rely on stable listing order for display and testing. Stale
    /// entries never appear, whether or not they have been purged.
    pub fn list_active(&self) -> Vec<ActiveLock> {
        self.list_active_at(Instant::now())
    }

    pub fn list_active_at(&self, now: Instant) -> Vec<ActiveLock> {
        let locks = self.locks.read();

        let mut active: Vec<ActiveLock> = locks
            .iter()
            .filter(|(_, lease)| !lease.is_expired_at(now))
            .map(|(name, lease)| ActiveLock {
                name: name.clone(),
                owner: lease.owner.clone(),
                remaining: lease.expires_at - now,
            })
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        active
    }

    /// Physically remove expired entries, returning how many were removed.
    ///
    /// Purely a space reclamation: all read paths already treat stale
    /// entries as absent, so correctness does not depend on this ever
    /// running.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut locks = self.locks.write();
        let before = locks.len();
        locks.retain(|_, lease| !lease.is_expired_at(now));
        before - locks.len()
    }

    /// Number of physical table entries, including stale ones.
    pub fn entry_count(&self) -> usize {
        self.locks.read().len()
    }
}

impl Default for LockManager {
    fn default() -> Self {
        Self::new()
    }
}
