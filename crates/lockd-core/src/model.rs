//! Data model for the lock manager.

use std::time::{Duration, Instant};

/// A granted lease: who holds a lock and when the grant lapses.
///
/// An entry whose `expires_at` is not after `now` is *stale*: it may
/// still sit in the table, but every read path treats it as absent.
#[derive(Clone, Debug)]
pub struct Lease {
    pub owner: String,
    pub expires_at: Instant,
}

impl Lease {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Outcome of a `try_acquire` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The lease was written; the caller now owns the lock.
    Granted,
    /// A different owner holds a non-expired lease. `remaining` is the
    /// time left on that lease, for caller diagnostics.
    Denied { remaining: Duration },
}

/// Outcome of a `release` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The entry was deleted, or no entry existed (idempotent release).
    Released,
    /// The entry belongs to `owner`, not the caller; nothing was deleted.
    Forbidden { owner: String },
}

/// A live entry as reported by `list_active`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveLock {
    pub name: String,
    pub owner: String,
    pub remaining: Duration,
}
