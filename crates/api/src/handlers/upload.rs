//! POST /api/upload -- upload a character image and reference video.
//!
//! Multipart form with two named file parts: `character` and
//! `reference`. Content types are validated before anything is sent to
//! the storage provider.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use recast_core::{validation, UploadRecord};
use recast_storage::ResourceType;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub upload_id: Uuid,
    pub character_url: String,
    pub reference_url: String,
}

/// One received multipart file part.
struct ReceivedFile {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

pub async fn upload_assets(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut character: Option<ReceivedFile> = None;
    let mut reference: Option<ReceivedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read field '{name}': {e}")))?
            .to_vec();

        let file = ReceivedFile {
            filename,
            content_type,
            bytes,
        };
        match name.as_str() {
            "character" => character = Some(file),
            "reference" => reference = Some(file),
            // Unknown parts are ignored.
            _ => {}
        }
    }

    let character = character
        .ok_or_else(|| AppError::BadRequest("Missing 'character' file part".into()))?;
    let reference = reference
        .ok_or_else(|| AppError::BadRequest("Missing 'reference' file part".into()))?;

    // Both content types checked before any storage call.
    validation::validate_image_content_type(&character.content_type)?;
    validation::validate_video_content_type(&reference.content_type)?;

    let character_asset = state
        .storage
        .upload(character.bytes, &character.filename, ResourceType::Image)
        .await?;
    let reference_asset = state
        .storage
        .upload(reference.bytes, &reference.filename, ResourceType::Video)
        .await?;

    let upload_id = Uuid::new_v4();
    state
        .uploads
        .insert(
            upload_id,
            UploadRecord {
                character_url: character_asset.url.clone(),
                reference_url: reference_asset.url.clone(),
                character_public_id: character_asset.public_id,
                reference_public_id: reference_asset.public_id,
            },
        )
        .await?;

    tracing::info!(%upload_id, "Assets uploaded");

    Ok(Json(UploadResponse {
        upload_id,
        character_url: character_asset.url,
        reference_url: reference_asset.url,
    }))
}
