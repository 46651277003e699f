//! Process bootstrap: HTTP server setup, logging, shutdown, and the
//! stale-lease sweeper.

pub mod http;
pub mod logging;
pub mod shutdown;
pub mod sweeper;

pub use http::lock_server;
pub use logging::{LogRotation, LoggingConfig, LoggingGuard, init_logging};
pub use shutdown::{ShutdownSignal, wait_for_shutdown_signal};
pub use sweeper::start_sweep_task;
