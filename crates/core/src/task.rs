//! Task records: one entry per generation job.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::settings::{GenerationSettings, ModelVariant};
use crate::stage::PipelineStage;
use crate::status::ProviderStatus;

/// Resolved input asset URLs for a generation job.
///
/// `frame_url` is only meaningful for the two-step pipeline, where it
/// seeds the image-edit stage.
#[derive(Debug, Clone)]
pub struct TaskInputs {
    pub character_url: String,
    pub reference_url: String,
    pub frame_url: Option<String>,
}

/// State of one generation job, owned by the task store and mutated
/// only by the pipeline coordinator and the submit path.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    pub id: Uuid,
    pub model: ModelVariant,
    pub character_url: String,
    pub reference_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_url: Option<String>,
    pub settings: GenerationSettings,
    /// Last normalized provider status.
    pub status: ProviderStatus,
    /// Pipeline position; always `None` for single-step tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<PipelineStage>,
    /// Provider-assigned sub-task ids, in stage order.
    pub provider_task_ids: Vec<String>,
    /// Image produced by the edit stage, input to the video stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_url: Option<String>,
    /// Final asset URLs; empty until terminal success.
    pub result_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Create a fresh record for a just-submitted job.
    pub fn new(
        inputs: TaskInputs,
        settings: GenerationSettings,
        provider_task_id: String,
        initial_status: ProviderStatus,
        stage: Option<PipelineStage>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: settings.model,
            character_url: inputs.character_url,
            reference_url: inputs.reference_url,
            frame_url: inputs.frame_url,
            settings,
            status: initial_status,
            stage,
            provider_task_ids: vec![provider_task_id],
            intermediate_url: None,
            result_urls: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// The provider sub-task id currently being polled (the most
    /// recently submitted one).
    pub fn current_provider_task_id(&self) -> Option<&str> {
        self.provider_task_ids.last().map(String::as_str)
    }

    /// Force the record into the absorbing failed state.
    pub fn fail(&mut self) {
        self.status = ProviderStatus::Failed;
        if self.stage.is_some() {
            self.stage = Some(PipelineStage::Failed);
        }
    }
}
