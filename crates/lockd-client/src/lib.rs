//! Rust client SDK for the lockd lock service
//!
//! Provides a thin HTTP client over the three lock operations plus the
//! client-mode hold workflow: acquire a lock, hold it for an interval
//! as a cancellable wait, and release it best-effort on every exit path.

pub mod error;
pub mod hold;
mod http;

pub use error::{ClientError, Result};
pub use hold::HoldConfig;
pub use http::{HttpClientConfig, LockdHttpClient};
