pub mod api;
pub mod assessment;
pub mod config;
pub mod db;
pub mod export;
pub mod gemini;
pub mod models;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::gemini::GeminiClient;
use crate::state::AppState;

/// Start the service and block until Ctrl-C.
pub async fn run() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    std::fs::create_dir_all(config::app_data_dir()).expect("Cannot create data directory");

    let gemini = GeminiClient::from_env();
    if !gemini.is_configured() {
        tracing::warn!("GEMINI_API_KEY not set; AI endpoints will respond 503");
    }

    let state = AppState::new(config::database_path(), gemini)
        .expect("Database initialization failed");

    let addr = SocketAddr::from(([0, 0, 0, 0], config::server_port()));
    let mut server = api::start_server(Arc::new(state), addr)
        .await
        .expect("error while starting CardioWell");

    tracing::info!(addr = %server.session.server_addr, "CardioWell API listening");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    server.shutdown();
}
