//! Lockd Core - the authoritative in-memory lock state
//!
//! This crate owns the lease table and decides every acquire and release.
//! It has no knowledge of the transport carrying requests; the HTTP
//! boundary lives in `lockd-server`.

pub mod manager;
pub mod model;

// Re-exports for convenience
pub use manager::LockManager;
pub use model::{AcquireOutcome, ActiveLock, Lease, ReleaseOutcome};
