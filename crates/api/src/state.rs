use std::sync::Arc;

use recast_pipeline::PipelineCoordinator;
use recast_storage::StorageClient;
use recast_store::{TaskStore, UploadStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Task records (in-memory; process lifetime).
    pub tasks: Arc<dyn TaskStore>,
    /// Upload records, consumed to resolve generation inputs.
    pub uploads: Arc<dyn UploadStore>,
    /// The orchestration engine.
    pub coordinator: Arc<PipelineCoordinator>,
    /// Asset storage provider (Cloudinary).
    pub storage: Arc<dyn StorageClient>,
}
