//! Lockd Common - Shared types and utilities
//!
//! This crate provides the foundational types used across all lockd components:
//! - Error types
//! - Common constants (wire parameter names, defaults)
//! - Owner identity derivation

pub mod error;
pub mod utils;

// Re-exports for convenience
pub use error::LockdError;
pub use utils::local_owner;

/// Query parameter names of the lock API
pub const PARAM_NAME: &str = "name";
pub const PARAM_OWNER: &str = "owner";
pub const PARAM_TIMEOUT: &str = "timeout";

/// Lock name used when client-mode is started without `--name`
pub const DEFAULT_LOCK_NAME: &str = "default_lock";

/// Default bind address and port for the lock server
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8420;

/// Default lease duration requested by client-mode, in seconds
pub const DEFAULT_LEASE_SECS: u64 = 60;

/// Default interval client-mode holds the lock before releasing, in seconds
pub const DEFAULT_HOLD_SECS: u64 = 60;

/// Default interval between stale-lease sweeps, in seconds (0 disables)
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30;

/// Default HTTP client timeouts, in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 30000;
