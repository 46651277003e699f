//! Shutdown tests for the lock HTTP server
//!
//! The server is built with signal handling disabled; stopping goes
//! through the server handle so in-flight requests can drain first.

use std::{sync::Arc, time::Duration};

use lockd_core::LockManager;
use lockd_server::{
    model::{app_state::AppState, config::Configuration},
    startup,
};

fn test_state() -> Arc<AppState> {
    Arc::new(AppState {
        configuration: Configuration::default(),
        lock_manager: Arc::new(LockManager::new()),
    })
}

#[actix_web::test]
async fn test_server_stops_gracefully_on_handle_stop() {
    let server = startup::lock_server(test_state(), "127.0.0.1".to_string(), 0)
        .expect("bind ephemeral port");
    let handle = server.handle();
    let server_task = actix_web::rt::spawn(server);

    handle.stop(true).await;

    let result = tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .expect("server did not stop after handle.stop");
    assert!(matches!(result, Ok(Ok(()))));
}

#[actix_web::test]
async fn test_server_stop_is_graceful_twice_bound() {
    // Two independent servers on ephemeral ports must stop without
    // interfering, since neither installs a process signal handler.
    let first = startup::lock_server(test_state(), "127.0.0.1".to_string(), 0)
        .expect("bind first server");
    let second = startup::lock_server(test_state(), "127.0.0.1".to_string(), 0)
        .expect("bind second server");

    let first_handle = first.handle();
    let second_handle = second.handle();
    let first_task = actix_web::rt::spawn(first);
    let second_task = actix_web::rt::spawn(second);

    first_handle.stop(true).await;
    second_handle.stop(true).await;

    for task in [first_task, second_task] {
        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("server did not stop");
        assert!(matches!(result, Ok(Ok(()))));
    }
}
