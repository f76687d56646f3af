pub mod api; // REST routes, handlers, server lifecycle
pub mod config;
pub mod db;
pub mod models;
pub mod triage; // Critical-condition classifier

use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
    #[error("Server error: {0}")]
    Server(#[from] api::ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Initialize tracing from `RUST_LOG`, falling back to the default filter.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Boot the service and serve until Ctrl-C.
pub async fn run() -> Result<(), AppError> {
    init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::AppConfig::from_env()?;
    let conn = db::open_database(&settings.db_path)?;
    let ctx = api::ApiContext::new(conn);

    let mut server = api::start_server(ctx, settings.socket_addr()).await?;

    let base_url = &server.session.base_url;
    tracing::info!("Server is listening at {base_url}");
    tracing::info!("Endpoints:");
    for (methods, path) in api::ENDPOINTS {
        tracing::info!("{base_url}{path} method: {methods}");
    }

    tokio::signal::ctrl_c().await.map_err(AppError::Signal)?;

    server.shutdown();
    server.stopped().await;
    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}
