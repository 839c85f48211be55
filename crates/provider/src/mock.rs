//! Simulated gateway for development without provider spend.
//!
//! Selected by `MOCK_MODE`. Progress is a function of elapsed time
//! since submission: in progress for 10 seconds, processing until 15,
//! then completed with a placeholder asset URL.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use recast_core::ProviderStatus;

use crate::error::ProviderError;
use crate::gateway::{PollResult, ProviderEndpoint, ProviderGateway, Submission, SubmitJob};

const IN_PROGRESS_SECS: u64 = 10;
const PROCESSING_SECS: u64 = 15;

const MOCK_IMAGE_URL: &str = "https://storage.googleapis.com/mock-image-result.jpg";
const MOCK_VIDEO_URL: &str = "https://storage.googleapis.com/mock-video-result.mp4";

struct MockTask {
    endpoint: ProviderEndpoint,
    started: Instant,
}

/// In-process [`ProviderGateway`] that simulates provider progress.
#[derive(Default)]
pub struct MockGateway {
    tasks: RwLock<HashMap<String, MockTask>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProviderGateway for MockGateway {
    async fn submit(&self, job: SubmitJob) -> Result<Submission, ProviderError> {
        let provider_task_id = Uuid::new_v4().to_string();
        self.tasks.write().await.insert(
            provider_task_id.clone(),
            MockTask {
                endpoint: job.endpoint(),
                started: Instant::now(),
            },
        );

        tracing::info!(
            endpoint = job.endpoint().as_str(),
            provider_task_id = %provider_task_id,
            "Mock provider job created",
        );

        Ok(Submission {
            provider_task_id,
            status: ProviderStatus::Created,
        })
    }

    async fn poll(
        &self,
        provider_task_id: &str,
        _endpoint: ProviderEndpoint,
    ) -> Result<PollResult, ProviderError> {
        let tasks = self.tasks.read().await;
        let task = tasks.get(provider_task_id).ok_or(ProviderError::Api {
            status: 404,
            body: format!("mock task not found: {provider_task_id}"),
        })?;

        let elapsed = task.started.elapsed().as_secs();
        let (status, result_urls) = if elapsed < IN_PROGRESS_SECS {
            (ProviderStatus::InProgress, Vec::new())
        } else if elapsed < PROCESSING_SECS {
            (ProviderStatus::Processing, Vec::new())
        } else {
            let url = match task.endpoint {
                ProviderEndpoint::SeedreamEdit => MOCK_IMAGE_URL,
                ProviderEndpoint::RunwayActTwo | ProviderEndpoint::KlingVideo => MOCK_VIDEO_URL,
            };
            (ProviderStatus::Completed, vec![url.to_string()])
        };

        Ok(PollResult {
            status,
            result_urls,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn mock_task_progresses_with_time() {
        let gateway = MockGateway::new();
        let submission = gateway
            .submit(SubmitJob::ImageToVideo {
                image_url: "https://cdn.test/edited.jpg".into(),
            })
            .await
            .unwrap();
        assert_eq!(submission.status, ProviderStatus::Created);

        let id = submission.provider_task_id;
        let poll = gateway
            .poll(&id, ProviderEndpoint::KlingVideo)
            .await
            .unwrap();
        assert_eq!(poll.status, ProviderStatus::InProgress);

        tokio::time::advance(Duration::from_secs(12)).await;
        let poll = gateway
            .poll(&id, ProviderEndpoint::KlingVideo)
            .await
            .unwrap();
        assert_eq!(poll.status, ProviderStatus::Processing);

        tokio::time::advance(Duration::from_secs(5)).await;
        let poll = gateway
            .poll(&id, ProviderEndpoint::KlingVideo)
            .await
            .unwrap();
        assert_eq!(poll.status, ProviderStatus::Completed);
        assert_eq!(poll.result_urls, vec![MOCK_VIDEO_URL.to_string()]);
    }

    #[tokio::test]
    async fn image_edit_tasks_complete_with_an_image() {
        let gateway = MockGateway::new();
        let submission = gateway
            .submit(SubmitJob::ImageEdit {
                frame_url: "f".into(),
                character_url: "c".into(),
            })
            .await
            .unwrap();

        // Backdate the task past the completion threshold.
        {
            let mut tasks = gateway.tasks.write().await;
            let task = tasks.get_mut(&submission.provider_task_id).unwrap();
            task.started = Instant::now() - Duration::from_secs(PROCESSING_SECS + 1);
        }

        let poll = gateway
            .poll(&submission.provider_task_id, ProviderEndpoint::SeedreamEdit)
            .await
            .unwrap();
        assert_eq!(poll.status, ProviderStatus::Completed);
        assert_eq!(poll.result_urls, vec![MOCK_IMAGE_URL.to_string()]);
    }

    #[tokio::test]
    async fn unknown_mock_task_is_a_fatal_api_error() {
        let gateway = MockGateway::new();
        let err = gateway
            .poll("no-such-task", ProviderEndpoint::RunwayActTwo)
            .await
            .unwrap_err();
        assert!(!err.is_transient());
    }
}
