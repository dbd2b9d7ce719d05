//! Student Dashboard API Server
//!
//! Serves the dashboard endpoints that contrast sequential and parallel
//! loading of student data. This service is stateless and can be
//! horizontally scaled.

use dotenvy::dotenv;
use student_dashboard::common::saturating_millis;
use student_dashboard::config::{get_environment, AppConfig};
use student_dashboard::core::http::start_server;
use student_dashboard::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env();
    let env = get_environment();
    info!("Starting Student Dashboard API Server");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        fetch_delay_ms = saturating_millis(config.fetch_delay),
        fetch_timeout_ms = config.fetch_timeout.map(saturating_millis),
        "Simulated data source latency"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
