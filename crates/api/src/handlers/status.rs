//! GET /api/status/{task_id} -- poll task status.
//!
//! Status checks are what drive pipeline advancement: each request
//! asks the coordinator to advance the task before reporting.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use recast_core::{ModelVariant, PipelineStage, ProviderStatus};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub task_id: Uuid,
    pub status: ProviderStatus,
    /// Human-facing progress label for the UI.
    pub progress_stage: String,
    pub result_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_stage: Option<PipelineStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_url: Option<String>,
    pub model_used: ModelVariant,
}

pub async fn task_status(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> AppResult<Json<StatusResponse>> {
    let record = state.coordinator.advance(task_id).await?;

    Ok(Json(StatusResponse {
        task_id,
        progress_stage: record.status.progress_label().to_string(),
        status: record.status,
        result_urls: record.result_urls,
        pipeline_stage: record.stage,
        frame_url: record.frame_url,
        intermediate_url: record.intermediate_url,
        model_used: record.model,
    }))
}
