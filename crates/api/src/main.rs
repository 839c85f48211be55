use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recast_api::config::ServerConfig;
use recast_api::router::build_app_router;
use recast_api::state::AppState;
use recast_pipeline::PipelineCoordinator;
use recast_provider::{FreepikClient, MockGateway, ProviderConfig, ProviderGateway};
use recast_storage::{CloudinaryClient, StorageConfig};
use recast_store::{MemoryTaskStore, MemoryUploadStore, TaskStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recast_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Provider gateway ---
    let gateway: Arc<dyn ProviderGateway> = if config.mock_mode {
        tracing::warn!("MOCK_MODE enabled - provider calls will be simulated");
        Arc::new(MockGateway::new())
    } else {
        let provider_config = ProviderConfig::from_env();
        if provider_config.api_key.is_empty() {
            tracing::warn!("FREEPIK_API_KEY is not set - provider calls will be rejected");
        }
        Arc::new(FreepikClient::new(provider_config))
    };

    // --- Asset storage ---
    let storage_config = StorageConfig::from_env();
    if !storage_config.is_configured() {
        tracing::warn!(
            "CLOUDINARY_CLOUD_NAME / CLOUDINARY_UPLOAD_PRESET not set - uploads will fail"
        );
    }
    let storage = Arc::new(CloudinaryClient::new(storage_config));

    // --- Stores and coordinator ---
    let tasks: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());
    let uploads = Arc::new(MemoryUploadStore::new());
    let coordinator = Arc::new(PipelineCoordinator::new(Arc::clone(&tasks), gateway));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        tasks,
        uploads,
        coordinator,
        storage,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
