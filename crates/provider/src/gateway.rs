//! The create/poll gateway contract.

use async_trait::async_trait;

use recast_core::{AspectRatio, ProviderStatus};

use crate::error::ProviderError;

/// The three provider endpoints the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderEndpoint {
    /// RunWay Act Two: single-step character performance transfer.
    RunwayActTwo,
    /// Seedream 4 Edit: instructional image edit (pipeline stage 1).
    SeedreamEdit,
    /// Kling 2.5 Pro: image-to-video synthesis (pipeline stage 2).
    KlingVideo,
}

impl ProviderEndpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderEndpoint::RunwayActTwo => "runway_act_two",
            ProviderEndpoint::SeedreamEdit => "seedream_edit",
            ProviderEndpoint::KlingVideo => "kling_v2_5_pro",
        }
    }
}

/// A submission payload, one variant per endpoint.
#[derive(Debug, Clone)]
pub enum SubmitJob {
    /// Single-step character replacement (RunWay Act Two).
    CharacterPerformance {
        character_url: String,
        reference_url: String,
        ratio: AspectRatio,
        expression_intensity: u8,
        body_control: bool,
        seed: Option<u32>,
    },
    /// Pipeline stage 1: replace the character in an extracted frame.
    ImageEdit {
        frame_url: String,
        character_url: String,
    },
    /// Pipeline stage 2: animate the edited frame.
    ImageToVideo { image_url: String },
}

impl SubmitJob {
    /// The endpoint this job targets.
    pub fn endpoint(&self) -> ProviderEndpoint {
        match self {
            SubmitJob::CharacterPerformance { .. } => ProviderEndpoint::RunwayActTwo,
            SubmitJob::ImageEdit { .. } => ProviderEndpoint::SeedreamEdit,
            SubmitJob::ImageToVideo { .. } => ProviderEndpoint::KlingVideo,
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Provider-assigned identifier for the remote job.
    pub provider_task_id: String,
    pub status: ProviderStatus,
}

/// Result of a successful status poll.
#[derive(Debug, Clone)]
pub struct PollResult {
    pub status: ProviderStatus,
    /// Generated asset URLs; empty until the remote job finishes.
    pub result_urls: Vec<String>,
}

/// Abstraction over the external generation backend.
///
/// Each call is exactly one network round trip bounded by a fixed
/// deadline. The gateway never retries internally -- retry policy
/// belongs to the caller.
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    async fn submit(&self, job: SubmitJob) -> Result<Submission, ProviderError>;

    async fn poll(
        &self,
        provider_task_id: &str,
        endpoint: ProviderEndpoint,
    ) -> Result<PollResult, ProviderError>;
}
