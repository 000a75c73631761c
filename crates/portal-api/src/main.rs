//! HTTP API for the Ready Set Insure employee and client portals.
//!
//! Wires the store, the Vapi client, and the call orchestrator together
//! and serves the portal's JSON routes.

mod config;
mod error;
mod routes;
mod state;

use database::Database;
use orchestrator::{CallOrchestrator, MonitorConfig};
use tower_http::cors::CorsLayer;
use tracing::info;
use vapi_client::{VapiClient, VapiConfig};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting portal API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Build the call provider client
    let mut vapi_config = VapiConfig::new(&config.vapi_api_key, &config.vapi_phone_number_id)
        .with_base_url(&config.vapi_base_url);
    if let Some(assistant_id) = &config.vapi_assistant_id {
        vapi_config = vapi_config.with_assistant_id(assistant_id);
    }
    let provider = VapiClient::new(vapi_config)?;

    // Build the orchestrator
    let call_orchestrator = CallOrchestrator::new(db.clone(), provider).with_monitor_config(
        MonitorConfig {
            poll_interval: config.poll_interval,
            max_wait: config.max_wait,
        },
    );

    // Build application state
    let state = AppState::new(db, call_orchestrator);

    // Build router; the portal frontends are served from another origin
    let app = routes::router().layer(CorsLayer::permissive()).with_state(state);

    // Start server
    info!(addr = %config.addr, "Portal API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
