//! Provider endpoint configuration loaded from environment variables.

use std::time::Duration;

/// Per-call deadline for provider round trips.
pub const REQUEST_DEADLINE: Duration = Duration::from_secs(30);

/// Freepik API configuration.
///
/// Status URL templates contain a `{task_id}` placeholder. An empty
/// create URL or template means the endpoint is not configured; using
/// it fails fatally with `MissingEndpoint`.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub runway_create_url: String,
    pub runway_status_template: String,
    pub seedream_create_url: String,
    pub seedream_status_template: String,
    pub kling_create_url: String,
    pub kling_status_template: String,
}

impl ProviderConfig {
    /// Load configuration from environment variables with the default
    /// Freepik endpoints.
    ///
    /// | Env Var                                 | Default                                                   |
    /// |-----------------------------------------|-----------------------------------------------------------|
    /// | `FREEPIK_API_KEY`                       | *(empty)*                                                 |
    /// | `FREEPIK_RUNWAY_CREATE_URL`             | `{base}/runway-act-two`                                   |
    /// | `FREEPIK_RUNWAY_STATUS_URL_TEMPLATE`    | `{base}/runway-act-two/{task_id}`                         |
    /// | `FREEPIK_SEEDREAM_EDIT_CREATE_URL`      | `.../text-to-image/seedream-v4-edit`                      |
    /// | `FREEPIK_SEEDREAM_EDIT_STATUS_URL_TEMPLATE` | `.../text-to-image/seedream-v4-edit/{task_id}`        |
    /// | `FREEPIK_KLING_CREATE_URL`              | `.../image-to-video/kling-v2-5-pro`                       |
    /// | `FREEPIK_KLING_STATUS_URL_TEMPLATE`     | `.../image-to-video/kling-v2-5-pro/{task_id}`             |
    ///
    /// where `{base}` is `FREEPIK_API_BASE_URL`
    /// (default `https://api.freepik.com/v1/ai/video`).
    pub fn from_env() -> Self {
        let base = env_or("FREEPIK_API_BASE_URL", "https://api.freepik.com/v1/ai/video");

        Self {
            api_key: env_or("FREEPIK_API_KEY", ""),
            runway_create_url: env_or(
                "FREEPIK_RUNWAY_CREATE_URL",
                &format!("{base}/runway-act-two"),
            ),
            runway_status_template: env_or(
                "FREEPIK_RUNWAY_STATUS_URL_TEMPLATE",
                &format!("{base}/runway-act-two/{{task_id}}"),
            ),
            seedream_create_url: env_or(
                "FREEPIK_SEEDREAM_EDIT_CREATE_URL",
                "https://api.freepik.com/v1/ai/text-to-image/seedream-v4-edit",
            ),
            seedream_status_template: env_or(
                "FREEPIK_SEEDREAM_EDIT_STATUS_URL_TEMPLATE",
                "https://api.freepik.com/v1/ai/text-to-image/seedream-v4-edit/{task_id}",
            ),
            kling_create_url: env_or(
                "FREEPIK_KLING_CREATE_URL",
                "https://api.freepik.com/v1/ai/image-to-video/kling-v2-5-pro",
            ),
            kling_status_template: env_or(
                "FREEPIK_KLING_STATUS_URL_TEMPLATE",
                "https://api.freepik.com/v1/ai/image-to-video/kling-v2-5-pro/{task_id}",
            ),
        }
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}
