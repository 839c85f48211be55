//! POST /api/generate -- start a generation task.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recast_core::{validation, GenerationSettings, ProviderStatus, TaskInputs};

use crate::error::AppResult;
use crate::state::AppState;

/// Direct input URLs, the alternative to referencing a prior upload.
#[derive(Debug, Deserialize)]
pub struct DirectUrls {
    pub character_url: String,
    pub reference_url: String,
}

/// Request body: exactly one of `upload_id` / `direct_urls` must be
/// present. `frame_url` is mandatory for the two-step pipeline.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub upload_id: Option<Uuid>,
    #[serde(default)]
    pub direct_urls: Option<DirectUrls>,
    pub settings: GenerationSettings,
    #[serde(default)]
    pub frame_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub task_id: Uuid,
    pub status: ProviderStatus,
}

/// Validate the request, resolve input URLs, and submit the job.
///
/// All validation happens before any provider call; a rejected request
/// never mutates stored state.
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    validation::validate_input_source(input.upload_id.is_some(), input.direct_urls.is_some())?;
    validation::validate_settings(&input.settings)?;
    validation::validate_frame_url(input.settings.model, input.frame_url.as_deref())?;

    let (character_url, reference_url) = match (input.upload_id, input.direct_urls) {
        (Some(upload_id), None) => {
            let upload = state.uploads.get(upload_id).await?;
            (upload.character_url, upload.reference_url)
        }
        (None, Some(direct)) => (direct.character_url, direct.reference_url),
        // Already rejected by validate_input_source.
        _ => {
            return Err(recast_core::CoreError::Validation(
                "Either upload_id or direct_urls must be provided".into(),
            )
            .into())
        }
    };

    let inputs = TaskInputs {
        character_url,
        reference_url,
        frame_url: input.frame_url,
    };

    let record = state.coordinator.submit_task(inputs, input.settings).await?;

    Ok(Json(GenerateResponse {
        task_id: record.id,
        status: record.status,
    }))
}
