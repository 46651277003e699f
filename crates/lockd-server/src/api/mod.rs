//! HTTP API handlers.

pub mod lock;
