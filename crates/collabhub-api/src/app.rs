//! Application builder: wires repositories, storage, and services into an
//! Axum app and runs it.

use axum::Router;

use collabhub_core::config::AppConfig;
use collabhub_core::error::AppError;
use collabhub_core::result::AppResult;
use collabhub_database::Repositories;
use collabhub_service::Services;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application from prepared state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Connects every backend named in `config` and serves until a shutdown
/// signal arrives.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting CollabHub server...");

    tracing::info!("Connecting to database...");
    let (repos, db_pool) = Repositories::connect(&config.database).await?;

    tracing::info!(provider = %config.storage.provider, "Initializing blob store...");
    let blobs = collabhub_storage::from_config(&config.storage).await?;

    let services = Services::new(&repos, blobs.clone());

    let addr = config.server.bind_address();
    let state = AppState::new(config, db_pool.clone(), blobs, services);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("CollabHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("CollabHub server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
