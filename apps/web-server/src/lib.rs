//! # Sample App Web Server
//!
//! Server-rendered microblogging: signup and sign-in, profiles, microposts
//! and a follower graph, routed through the shared route table.
//!
//! The binary in `main.rs` wires this library into an `HttpServer`; the
//! integration tests build the same `App` through [`configure_app`].

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod seed;
pub mod state;
pub mod telemetry;
pub mod views;

#[cfg(feature = "scheduler")]
pub mod background;

use actix_web::web;

use middleware::error::AppError;
use state::AppState;

/// Register application data and every route on an `App`.
///
/// Callers still wrap the app in [`middleware::MethodOverride`] so that
/// form posts carrying `_method` reach the right route.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            // An id that does not parse names no record.
            .app_data(web::PathConfig::default().error_handler(|err, req| {
                tracing::debug!(path = %req.path(), error = %err, "Unroutable id");
                AppError::NotFound(format!("No route matches {}", req.path())).into()
            }))
            .app_data(web::FormConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }));
        handlers::configure_routes(cfg);
    }
}
