// src/main.rs

use std::sync::Arc;

use quiz_system::config::Config;
use quiz_system::error::AppError;
use quiz_system::routes;
use quiz_system::state::AppState;
use quiz_system::storage::{KeyValueStore, MemoryStore, SqliteStore};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration from environment (.env included)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let store = open_store(&config).await?;

    // Create AppState
    let state = AppState::new(store, &config);

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .map_err(|e| {
            AppError::InternalServerError(format!(
                "Failed to bind {}: {}",
                config.bind_address, e
            ))
        })?;
    tracing::info!("Listening on {}", config.bind_address);

    // Start the server
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Server error: {}", e)))
}

async fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, AppError> {
    if config.uses_memory_store() {
        tracing::warn!("Using the in-memory store; nothing will survive a restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = SqliteStore::connect(&config.database_url).await?;
    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    store.run_migrations().await?;
    tracing::info!("Migrations applied successfully.");

    Ok(Arc::new(store))
}
