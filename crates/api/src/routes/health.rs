use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Human-readable service name.
    pub service: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET / -- service liveness.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "Character Replacement MVP",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mount the health check at the root level (not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
