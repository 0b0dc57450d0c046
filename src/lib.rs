pub mod config;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
pub mod utils;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::repository::EventRepository;
use crate::routes::create_routes;
use crate::state::AppState;
use crate::utils::error::StartupError;

const DEFAULT_LOG_FILTER: &str = "info,events_server=debug";

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Opens the store, builds the router and serves until Ctrl-C.
pub async fn run(config: Config) -> Result<(), StartupError> {
    let events = EventRepository::connect(&config.database_path).await?;
    events.init_schema().await?;

    let app = create_routes(AppState::new(events.clone()), &config);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    events.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
