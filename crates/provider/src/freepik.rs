//! HTTP client for the Freepik generation endpoints.
//!
//! One round trip per call, bounded by [`REQUEST_DEADLINE`]. Responses
//! arrive wrapped in a `{ "data": ... }` envelope. No internal
//! retries: transient failures bubble up classified as such and the
//! caller decides.

use async_trait::async_trait;
use serde::Deserialize;

use recast_core::ProviderStatus;

use crate::config::{ProviderConfig, REQUEST_DEADLINE};
use crate::error::ProviderError;
use crate::gateway::{PollResult, ProviderEndpoint, ProviderGateway, Submission, SubmitJob};

/// Fixed instruction for the Seedream image-edit stage.
const IMAGE_EDIT_PROMPT: &str = "Reference image 1 is the frame. Reference image 2 is the \
    character. Replace the person in reference image 1 with the person from reference image 2. \
    Preserve the scene, pose, lighting, and camera angle. Keep identity, facial structure, and \
    hairstyle from reference image 2.";

/// Fixed prompt for the Kling image-to-video stage.
const VIDEO_PROMPT: &str =
    "Ultra realistic video of a girl smiling and dancing, cinematic lighting";

/// Seedream aspect ratio for edited frames.
const IMAGE_EDIT_ASPECT_RATIO: &str = "widescreen_16_9";
const IMAGE_EDIT_GUIDANCE_SCALE: f64 = 7.5;

/// Kling clip length in seconds (string per the API contract).
const VIDEO_DURATION: &str = "5";
const VIDEO_CFG_SCALE: f64 = 0.5;

const API_KEY_HEADER: &str = "x-freepik-api-key";

/// Envelope wrapper used by every Freepik response.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct CreateData {
    task_id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct StatusData {
    #[serde(default = "unknown_status")]
    status: String,
    #[serde(default)]
    generated: Vec<String>,
}

fn unknown_status() -> String {
    "UNKNOWN".to_string()
}

/// Real [`ProviderGateway`] implementation over the Freepik HTTP API.
pub struct FreepikClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl FreepikClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create URL for an endpoint, or `MissingEndpoint` if unset.
    fn create_url(&self, endpoint: ProviderEndpoint) -> Result<&str, ProviderError> {
        let url = match endpoint {
            ProviderEndpoint::RunwayActTwo => &self.config.runway_create_url,
            ProviderEndpoint::SeedreamEdit => &self.config.seedream_create_url,
            ProviderEndpoint::KlingVideo => &self.config.kling_create_url,
        };
        if url.is_empty() {
            return Err(ProviderError::MissingEndpoint(endpoint.as_str()));
        }
        Ok(url)
    }

    /// Status URL for a provider task id, expanded from the template.
    fn status_url(
        &self,
        endpoint: ProviderEndpoint,
        provider_task_id: &str,
    ) -> Result<String, ProviderError> {
        let template = match endpoint {
            ProviderEndpoint::RunwayActTwo => &self.config.runway_status_template,
            ProviderEndpoint::SeedreamEdit => &self.config.seedream_status_template,
            ProviderEndpoint::KlingVideo => &self.config.kling_status_template,
        };
        if template.is_empty() {
            return Err(ProviderError::MissingEndpoint(endpoint.as_str()));
        }
        Ok(template.replace("{task_id}", provider_task_id))
    }

    fn payload(job: &SubmitJob) -> serde_json::Value {
        match job {
            SubmitJob::CharacterPerformance {
                character_url,
                reference_url,
                ratio,
                expression_intensity,
                body_control,
                seed,
            } => {
                let mut payload = serde_json::json!({
                    "character": { "type": "image", "uri": character_url },
                    "reference": { "type": "video", "uri": reference_url },
                    "ratio": ratio.as_str(),
                    "expression_intensity": expression_intensity,
                    "body_control": body_control,
                });
                if let Some(seed) = seed {
                    payload["seed"] = serde_json::json!(seed);
                }
                payload
            }
            SubmitJob::ImageEdit {
                frame_url,
                character_url,
            } => serde_json::json!({
                "prompt": IMAGE_EDIT_PROMPT,
                "reference_images": [frame_url, character_url],
                "aspect_ratio": IMAGE_EDIT_ASPECT_RATIO,
                "guidance_scale": IMAGE_EDIT_GUIDANCE_SCALE,
            }),
            SubmitJob::ImageToVideo { image_url } => serde_json::json!({
                "prompt": VIDEO_PROMPT,
                "image": image_url,
                "duration": VIDEO_DURATION,
                "cfg_scale": VIDEO_CFG_SCALE,
            }),
        }
    }

    /// Ensure a success status code, or capture status and body as an
    /// `Api` error.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_envelope<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let response = Self::ensure_success(response).await?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ProviderGateway for FreepikClient {
    async fn submit(&self, job: SubmitJob) -> Result<Submission, ProviderError> {
        let endpoint = job.endpoint();
        let url = self.create_url(endpoint)?.to_string();
        let payload = Self::payload(&job);

        tracing::debug!(endpoint = endpoint.as_str(), %url, "Submitting provider job");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&payload)
            .timeout(REQUEST_DEADLINE)
            .send()
            .await?;

        let data: CreateData = Self::parse_envelope(response).await?;
        tracing::info!(
            endpoint = endpoint.as_str(),
            provider_task_id = %data.task_id,
            status = %data.status,
            "Provider job submitted",
        );

        Ok(Submission {
            provider_task_id: data.task_id,
            status: ProviderStatus::from(data.status),
        })
    }

    async fn poll(
        &self,
        provider_task_id: &str,
        endpoint: ProviderEndpoint,
    ) -> Result<PollResult, ProviderError> {
        let url = self.status_url(endpoint, provider_task_id)?;

        tracing::debug!(
            endpoint = endpoint.as_str(),
            provider_task_id,
            %url,
            "Polling provider task",
        );

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(REQUEST_DEADLINE)
            .send()
            .await?;

        let data: StatusData = Self::parse_envelope(response).await?;

        Ok(PollResult {
            status: ProviderStatus::from(data.status),
            result_urls: data.generated,
        })
    }
}
