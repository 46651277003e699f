//! Entry point for the lockd binary.
//!
//! One binary, two modes: `--server` runs the HTTP lock server; without
//! it the process acts as a client that acquires the named lock, holds
//! it for a fixed interval, and releases it on exit or termination.

use std::sync::Arc;

use lockd_client::{HoldConfig, HttpClientConfig, LockdHttpClient};
use lockd_core::LockManager;
use lockd_server::{
    model::{app_state::AppState, config::Configuration},
    startup,
};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = Configuration::new();
    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    if configuration.is_server() {
        run_server(configuration).await
    } else {
        run_client(configuration).await
    }
}

async fn run_server(configuration: Configuration) -> Result<(), Box<dyn std::error::Error>> {
    let lock_manager = Arc::new(LockManager::new());

    let sweep_handle = configuration.sweep_interval().map(|interval| {
        info!(interval_secs = interval.as_secs(), "starting stale lease sweeper");
        startup::start_sweep_task(lock_manager.clone(), interval)
    });

    let address = configuration.server_address();
    let port = configuration.server_port();
    let app_state = Arc::new(AppState {
        configuration,
        lock_manager,
    });

    let shutdown = startup::wait_for_shutdown_signal().await;
    let mut shutdown_rx = shutdown.subscribe();

    info!("Starting lock server on {}:{}", address, port);
    let server = startup::lock_server(app_state, address, port)?;
    let server_handle = server.handle();
    let mut server_task = actix_web::rt::spawn(server);

    tokio::select! {
        result = &mut server_task => {
            match result {
                Ok(Err(e)) => error!("Lock server error: {}", e),
                Err(e) => error!("Lock server task failed: {}", e),
                Ok(Ok(())) => {}
            }
        }
        _ = shutdown_rx.recv() => {
            info!("Lock server shutting down gracefully");
            // Waits for in-flight requests before returning.
            server_handle.stop(true).await;
            if let Ok(Err(e)) = server_task.await {
                error!("Lock server error during shutdown: {}", e);
            }
        }
    }

    if let Some(handle) = sweep_handle {
        handle.abort();
    }

    info!("lockd server shutdown complete");
    Ok(())
}

async fn run_client(configuration: Configuration) -> Result<(), Box<dyn std::error::Error>> {
    let owner = lockd_common::local_owner();
    let name = configuration.lock_name();
    info!(name = %name, owner = %owner, "running in client mode");

    let client_config = HttpClientConfig::new(&configuration.server_url())
        .with_timeouts(configuration.connect_timeout_ms(), configuration.read_timeout_ms());
    let client = LockdHttpClient::new(client_config)?;
    let hold = HoldConfig {
        name,
        owner,
        lease: configuration.lease_duration(),
        hold: configuration.hold_duration(),
    };

    if let Err(e) = lockd_client::hold::run(&client, &hold).await {
        if e.is_already_locked() {
            error!("Lock is held by another owner: {}", e);
        } else {
            error!("Client error: {}", e);
        }
        return Err(e.into());
    }
    Ok(())
}
