//! Shared application state injected into every handler.

use std::sync::Arc;

use lockd_core::LockManager;

use super::config::Configuration;

/// State handed to the HTTP server via `web::Data`.
///
/// The lock manager is an explicitly owned value created once at
/// startup; there is no package-level singleton.
pub struct AppState {
    pub configuration: Configuration,
    pub lock_manager: Arc<LockManager>,
}
