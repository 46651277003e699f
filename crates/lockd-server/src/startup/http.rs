//! HTTP server setup for the lock service.

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};

use crate::{api, model::app_state::AppState};

/// Creates and binds the lock HTTP server.
///
/// The server exposes the three lock operations; all state lives in the
/// injected `AppState`, so closing the server loses nothing beyond the
/// in-memory table itself. Signal handling is left to the caller, which
/// stops the server through its handle.
pub fn lock_server(
    app_state: Arc<AppState>,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::from(app_state.clone()))
            .service(api::lock::acquire)
            .service(api::lock::release)
            .service(api::lock::list)
    })
    .disable_signals()
    .bind((address, port))?
    .run())
}
