//! Lockd Server - HTTP boundary for the lock manager
//!
//! This crate is the thin transport around `lockd-core`: it validates
//! inbound request fields, calls the lock manager, and maps outcomes to
//! wire responses. It also owns process bootstrap: configuration,
//! logging, graceful shutdown, and the stale-lease sweeper.

pub mod api;
pub mod model;
pub mod startup;
