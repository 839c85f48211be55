//! Asset storage client.
//!
//! Thin plumbing around Cloudinary's unsigned upload endpoint: the
//! service only needs a public URL (and public id for bookkeeping) for
//! each uploaded character image and reference video.

use async_trait::async_trait;
use serde::Deserialize;

/// Folder assets are organised under in the storage provider.
const UPLOAD_FOLDER: &str = "character-replacement-mvp";

/// Storage resource kind, part of the upload URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Image,
    Video,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Video => "video",
        }
    }
}

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The storage provider returned a non-2xx status code.
    #[error("Storage API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The provider responded 2xx but the body was unexpected.
    #[error("Unexpected storage response: {0}")]
    Decode(String),
}

/// A successfully stored asset.
#[derive(Debug, Clone)]
pub struct StoredAsset {
    /// Publicly reachable HTTPS URL.
    pub url: String,
    /// Provider-assigned public id, kept for later cleanup.
    pub public_id: String,
}

/// Abstraction over the asset storage provider.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        resource_type: ResourceType,
    ) -> Result<StoredAsset, StorageError>;
}

/// Cloudinary configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Cloudinary cloud name (`CLOUDINARY_CLOUD_NAME`).
    pub cloud_name: String,
    /// Unsigned upload preset (`CLOUDINARY_UPLOAD_PRESET`).
    pub upload_preset: String,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME").unwrap_or_default(),
            upload_preset: std::env::var("CLOUDINARY_UPLOAD_PRESET").unwrap_or_default(),
        }
    }

    /// Whether both required values are present.
    pub fn is_configured(&self) -> bool {
        !self.cloud_name.is_empty() && !self.upload_preset.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponseBody {
    secure_url: String,
    public_id: String,
}

/// [`StorageClient`] implementation over Cloudinary's unsigned upload
/// REST endpoint.
pub struct CloudinaryClient {
    client: reqwest::Client,
    config: StorageConfig,
}

impl CloudinaryClient {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn upload_url(&self, resource_type: ResourceType) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/{}/upload",
            self.config.cloud_name,
            resource_type.as_str()
        )
    }
}

#[async_trait]
impl StorageClient for CloudinaryClient {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        resource_type: ResourceType,
    ) -> Result<StoredAsset, StorageError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone())
            .text("folder", UPLOAD_FOLDER);

        let url = self.upload_url(resource_type);
        tracing::debug!(%url, filename, "Uploading asset to storage");

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: UploadResponseBody = response
            .json()
            .await
            .map_err(|e| StorageError::Decode(e.to_string()))?;

        tracing::info!(public_id = %body.public_id, "Asset uploaded");

        Ok(StoredAsset {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }
}
