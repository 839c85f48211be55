//! The task/pipeline orchestration engine.
//!
//! Single-step jobs are one provider submission polled until done.
//! Two-step jobs chain an image edit into a video synthesis; the
//! coordinator advances them only in response to status requests --
//! there is no background ticking.
//!
//! Failure policy: transient provider errors are absorbed and the last
//! stored state is echoed; a fatal error on the first call of a step
//! surfaces without mutating the record; a fatal error on the chained
//! video submission forces the task into the absorbing failed stage.

use std::sync::Arc;

use uuid::Uuid;

use recast_core::{
    validation, CoreError, GenerationSettings, ModelVariant, PipelineStage, ProviderStatus,
    TaskInputs, TaskRecord,
};
use recast_provider::{PollResult, ProviderEndpoint, ProviderError, ProviderGateway, SubmitJob};
use recast_store::TaskStore;

/// Errors surfaced by the coordinator to its caller.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Drives task records through their lifecycle against the provider
/// gateway and the task store.
pub struct PipelineCoordinator {
    tasks: Arc<dyn TaskStore>,
    gateway: Arc<dyn ProviderGateway>,
}

impl PipelineCoordinator {
    pub fn new(tasks: Arc<dyn TaskStore>, gateway: Arc<dyn ProviderGateway>) -> Self {
        Self { tasks, gateway }
    }

    /// Submit a new generation job and persist its initial record.
    ///
    /// The single dispatch point over the closed variant set: handlers
    /// never branch on the model themselves.
    pub async fn submit_task(
        &self,
        inputs: TaskInputs,
        settings: GenerationSettings,
    ) -> Result<TaskRecord, PipelineError> {
        match settings.model {
            ModelVariant::RunwayActTwo => self.submit_single_step(inputs, settings).await,
            ModelVariant::SeedreamKling => self.submit_two_step(inputs, settings).await,
        }
    }

    async fn submit_single_step(
        &self,
        inputs: TaskInputs,
        settings: GenerationSettings,
    ) -> Result<TaskRecord, PipelineError> {
        let submission = self
            .gateway
            .submit(SubmitJob::CharacterPerformance {
                character_url: inputs.character_url.clone(),
                reference_url: inputs.reference_url.clone(),
                ratio: settings.ratio,
                expression_intensity: settings.expression_intensity,
                body_control: settings.body_control,
                seed: settings.seed,
            })
            .await?;

        let record = TaskRecord::new(
            inputs,
            settings,
            submission.provider_task_id,
            submission.status,
            None,
        );
        self.tasks.create(record.clone()).await?;

        tracing::info!(task_id = %record.id, model = record.model.as_str(), "Task created");
        Ok(record)
    }

    async fn submit_two_step(
        &self,
        inputs: TaskInputs,
        settings: GenerationSettings,
    ) -> Result<TaskRecord, PipelineError> {
        validation::validate_frame_url(settings.model, inputs.frame_url.as_deref())?;
        // Checked non-empty just above.
        let frame_url = inputs.frame_url.clone().ok_or_else(|| {
            CoreError::Internal("frame_url missing after validation".to_string())
        })?;

        let submission = self
            .gateway
            .submit(SubmitJob::ImageEdit {
                frame_url,
                character_url: inputs.character_url.clone(),
            })
            .await?;

        let record = TaskRecord::new(
            inputs,
            settings,
            submission.provider_task_id,
            submission.status,
            Some(PipelineStage::ImageEditStarted),
        );
        self.tasks.create(record.clone()).await?;

        tracing::info!(task_id = %record.id, model = record.model.as_str(), "Pipeline task created");
        Ok(record)
    }

    /// Advance the task identified by `id` one step, if the provider
    /// has made progress, and return the (possibly updated) record.
    pub async fn advance(&self, id: Uuid) -> Result<TaskRecord, PipelineError> {
        let record = self.tasks.get(id).await?;
        match record.model {
            ModelVariant::RunwayActTwo => self.advance_single_step(record).await,
            ModelVariant::SeedreamKling => self.advance_pipeline(record).await,
        }
    }

    // -- Single-step ---------------------------------------------------

    async fn advance_single_step(
        &self,
        mut record: TaskRecord,
    ) -> Result<TaskRecord, PipelineError> {
        // Terminal statuses are idempotent reads.
        if record.status.is_terminal_success() || record.status.is_failed() {
            return Ok(record);
        }

        let provider_task_id = self.current_provider_task_id(&record)?;
        let poll = match self
            .gateway
            .poll(&provider_task_id, ProviderEndpoint::RunwayActTwo)
            .await
        {
            Ok(poll) => poll,
            Err(e) if e.is_transient() => {
                return self.echo_stored(record, &e);
            }
            Err(e) => return Err(e.into()),
        };

        record.status = poll.status;
        if record.status.is_terminal_success() {
            record.result_urls = poll.result_urls;
        }
        self.tasks.replace(record.id, record.clone()).await?;
        Ok(record)
    }

    // -- Two-step pipeline ---------------------------------------------

    async fn advance_pipeline(&self, record: TaskRecord) -> Result<TaskRecord, PipelineError> {
        match record.stage {
            Some(PipelineStage::ImageEditStarted) => self.advance_image_edit(record).await,
            // Observed only between a concurrent winner's CAS and its
            // video submission; nothing to poll yet.
            Some(PipelineStage::ImageEditCompleted) => Ok(record),
            Some(PipelineStage::VideoStarted) => self.advance_video(record).await,
            Some(PipelineStage::PipelineCompleted) | Some(PipelineStage::Failed) => Ok(record),
            None => Err(CoreError::Internal(format!(
                "pipeline task {} has no stage",
                record.id
            ))
            .into()),
        }
    }

    /// Stage 1: poll the image edit; on completion, chain the video
    /// submission.
    async fn advance_image_edit(&self, record: TaskRecord) -> Result<TaskRecord, PipelineError> {
        let edit_task_id = self.current_provider_task_id(&record)?;
        let poll = match self
            .gateway
            .poll(&edit_task_id, ProviderEndpoint::SeedreamEdit)
            .await
        {
            Ok(poll) => poll,
            Err(e) if e.is_transient() => {
                return self.echo_stored(record, &e);
            }
            Err(e) => return Err(e.into()),
        };

        if poll.status.is_failed() {
            return self.fail_task(record).await;
        }

        if !poll.status.is_terminal_success() {
            return self.store_status(record, poll.status).await;
        }

        // Only the request that flips the stage may submit the video
        // sub-task; concurrent losers observe the updated stage and
        // return the fresher record.
        let won = self
            .tasks
            .cas_stage(
                record.id,
                PipelineStage::ImageEditStarted,
                PipelineStage::ImageEditCompleted,
            )
            .await?;
        if !won {
            tracing::debug!(task_id = %record.id, "Lost stage transition race, skipping submission");
            return Ok(self.tasks.get(record.id).await?);
        }

        self.submit_video_stage(record.id, poll).await
    }

    /// Stage 1 -> 2 transition: capture the edited frame and submit it
    /// for video synthesis. Any submission failure forces the task
    /// into the failed stage and surfaces to the caller.
    async fn submit_video_stage(
        &self,
        id: Uuid,
        poll: PollResult,
    ) -> Result<TaskRecord, PipelineError> {
        // Re-read: the CAS already advanced the stored stage.
        let mut record = self.tasks.get(id).await?;

        let intermediate_url = match poll.result_urls.first() {
            Some(url) => url.clone(),
            None => {
                record.fail();
                self.tasks.replace(id, record).await?;
                return Err(CoreError::Internal(
                    "image edit completed without an output url".to_string(),
                )
                .into());
            }
        };
        record.intermediate_url = Some(intermediate_url.clone());

        match self
            .gateway
            .submit(SubmitJob::ImageToVideo {
                image_url: intermediate_url,
            })
            .await
        {
            Ok(submission) => {
                record.provider_task_ids.push(submission.provider_task_id);
                record.stage = Some(PipelineStage::VideoStarted);
                record.status = submission.status;
                self.tasks.replace(id, record.clone()).await?;
                tracing::info!(task_id = %id, "Video stage submitted");
                Ok(record)
            }
            Err(e) => {
                tracing::error!(task_id = %id, error = %e, "Video stage submission failed");
                record.fail();
                self.tasks.replace(id, record).await?;
                Err(e.into())
            }
        }
    }

    /// Stage 2: poll the video synthesis until it finishes.
    async fn advance_video(&self, record: TaskRecord) -> Result<TaskRecord, PipelineError> {
        let video_task_id = self.current_provider_task_id(&record)?;
        let poll = match self
            .gateway
            .poll(&video_task_id, ProviderEndpoint::KlingVideo)
            .await
        {
            Ok(poll) => poll,
            Err(e) if e.is_transient() => {
                return self.echo_stored(record, &e);
            }
            Err(e) => return Err(e.into()),
        };

        if poll.status.is_failed() {
            return self.fail_task(record).await;
        }

        if poll.status.is_terminal_success() {
            let mut record = record;
            record.status = poll.status;
            record.result_urls = poll.result_urls;
            record.stage = Some(PipelineStage::PipelineCompleted);
            self.tasks.replace(record.id, record.clone()).await?;
            tracing::info!(task_id = %record.id, "Pipeline completed");
            return Ok(record);
        }

        self.store_status(record, poll.status).await
    }

    // -- Shared helpers ------------------------------------------------

    fn current_provider_task_id(&self, record: &TaskRecord) -> Result<String, PipelineError> {
        record
            .current_provider_task_id()
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::Internal(format!("task {} has no provider task id", record.id)).into()
            })
    }

    /// Absorb a transient failure: log it and echo the stored record
    /// unchanged.
    fn echo_stored(
        &self,
        record: TaskRecord,
        error: &ProviderError,
    ) -> Result<TaskRecord, PipelineError> {
        tracing::warn!(
            task_id = %record.id,
            error = %error,
            "Transient provider failure, returning last known state",
        );
        Ok(record)
    }

    /// Store an in-progress provider status verbatim.
    async fn store_status(
        &self,
        mut record: TaskRecord,
        status: ProviderStatus,
    ) -> Result<TaskRecord, PipelineError> {
        record.status = status;
        self.tasks.replace(record.id, record.clone()).await?;
        Ok(record)
    }

    /// Transition the task into the absorbing failed stage.
    async fn fail_task(&self, mut record: TaskRecord) -> Result<TaskRecord, PipelineError> {
        record.fail();
        self.tasks.replace(record.id, record.clone()).await?;
        tracing::warn!(task_id = %record.id, "Provider reported task failure");
        Ok(record)
    }
}
