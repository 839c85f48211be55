//! Input validation for the upload and generate paths.
//!
//! All checks run before any provider or storage call; a failure here
//! never mutates stored state.

use crate::error::CoreError;
use crate::settings::{GenerationSettings, ModelVariant};

/// Accepted content types for the character image.
pub const VALID_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Accepted content types for the reference video.
pub const VALID_VIDEO_TYPES: &[&str] = &["video/mp4", "video/quicktime", "video/x-msvideo"];

/// Bounds for `expression_intensity`.
pub const MIN_EXPRESSION_INTENSITY: u8 = 1;
pub const MAX_EXPRESSION_INTENSITY: u8 = 5;

/// Validate that exactly one input source is present: an upload
/// reference or direct URLs, never both, never neither.
pub fn validate_input_source(has_upload_id: bool, has_direct_urls: bool) -> Result<(), CoreError> {
    match (has_upload_id, has_direct_urls) {
        (true, true) => Err(CoreError::Validation(
            "Cannot provide both upload_id and direct_urls".into(),
        )),
        (false, false) => Err(CoreError::Validation(
            "Either upload_id or direct_urls must be provided".into(),
        )),
        _ => Ok(()),
    }
}

/// Validate generation settings bounds.
pub fn validate_settings(settings: &GenerationSettings) -> Result<(), CoreError> {
    if !(MIN_EXPRESSION_INTENSITY..=MAX_EXPRESSION_INTENSITY)
        .contains(&settings.expression_intensity)
    {
        return Err(CoreError::Validation(format!(
            "expression_intensity must be between {MIN_EXPRESSION_INTENSITY} and {MAX_EXPRESSION_INTENSITY}"
        )));
    }
    Ok(())
}

/// The two-step pipeline needs a frame URL to seed the image-edit
/// stage; single-step jobs ignore it.
pub fn validate_frame_url(model: ModelVariant, frame_url: Option<&str>) -> Result<(), CoreError> {
    if model.is_two_step() && frame_url.map_or(true, str::is_empty) {
        return Err(CoreError::Validation(
            "frame_url is required for the seedream_kling pipeline".into(),
        ));
    }
    Ok(())
}

/// Validate the character image content type.
pub fn validate_image_content_type(content_type: &str) -> Result<(), CoreError> {
    if VALID_IMAGE_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid character file type. Allowed: jpg, png, webp".into(),
        ))
    }
}

/// Validate the reference video content type.
pub fn validate_video_content_type(content_type: &str) -> Result<(), CoreError> {
    if VALID_VIDEO_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid reference file type. Allowed: mp4, mov, avi".into(),
        ))
    }
}
