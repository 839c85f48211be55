pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /upload              upload character image + reference video
/// /generate            start a generation task
/// /status/{task_id}    poll task status (advances the pipeline)
/// /tasks               debug listing of all tasks and uploads
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::upload::upload_assets))
        .route("/generate", post(handlers::generate::generate))
        .route("/status/{task_id}", get(handlers::status::task_status))
        .route("/tasks", get(handlers::tasks::list_tasks))
}
