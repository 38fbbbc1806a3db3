//! # Sample App Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer};
use tracing_actix_web::TracingLogger;

use web_server::config::AppConfig;
use web_server::middleware::MethodOverride;
use web_server::state::AppState;
use web_server::telemetry::{self, TelemetryConfig};
use web_server::{configure_app, seed};

#[cfg(feature = "scheduler")]
use web_server::background::SweeperConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Sample App server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;

    if config.seed_sample_data {
        if let Err(e) = seed::populate(&state).await {
            tracing::error!(error = %e, "Failed to seed sample data");
        }
    }

    #[cfg(feature = "scheduler")]
    let sweeper = match web_server::background::start(&state, SweeperConfig::from_env()).await {
        Ok(sweeper) => Some(sweeper),
        Err(e) => {
            tracing::error!(error = %e, "Failed to start session sweeper");
            None
        }
    };

    let server = HttpServer::new(move || {
        App::new()
            .wrap(MethodOverride)
            .wrap(TracingLogger::default())
            .configure(configure_app(state.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    let result = server.await;

    #[cfg(feature = "scheduler")]
    if let Some(mut sweeper) = sweeper {
        if let Err(e) = sweeper.shutdown().await {
            tracing::warn!(error = %e, "Session sweeper did not shut down cleanly");
        }
    }

    result
}
