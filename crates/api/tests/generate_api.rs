//! Integration tests for POST /api/generate.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{assert_error, body_json, post_json};
use recast_core::{ProviderStatus, UploadRecord};
use recast_provider::{ProviderError, Submission};
use recast_store::{TaskStore, UploadStore};

fn direct_urls() -> serde_json::Value {
    json!({
        "character_url": "https://cdn.example.com/character.png",
        "reference_url": "https://cdn.example.com/reference.mp4"
    })
}

// ---------------------------------------------------------------------------
// Input source validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn both_input_sources_rejected() {
    let (app, handles) = common::build_test_app();

    let response = post_json(
        app,
        "/api/generate",
        json!({
            "upload_id": Uuid::new_v4(),
            "direct_urls": direct_urls(),
            "settings": {}
        }),
    )
    .await;

    let json = assert_error(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(handles.gateway.submitted_count(), 0);
}

#[tokio::test]
async fn missing_input_source_rejected() {
    let (app, handles) = common::build_test_app();

    let response = post_json(app, "/api/generate", json!({ "settings": {} })).await;

    let json = assert_error(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(handles.gateway.submitted_count(), 0);
}

#[tokio::test]
async fn unknown_upload_id_returns_404() {
    let (app, handles) = common::build_test_app();

    let response = post_json(
        app,
        "/api/generate",
        json!({
            "upload_id": Uuid::new_v4(),
            "settings": {}
        }),
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND).await;
    assert_eq!(handles.gateway.submitted_count(), 0);
}

// ---------------------------------------------------------------------------
// Settings validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn out_of_range_expression_intensity_rejected() {
    let (app, handles) = common::build_test_app();

    let response = post_json(
        app,
        "/api/generate",
        json!({
            "direct_urls": direct_urls(),
            "settings": { "expression_intensity": 0 }
        }),
    )
    .await;

    let json = assert_error(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(handles.gateway.submitted_count(), 0);
}

#[tokio::test]
async fn two_step_without_frame_url_rejected_before_any_provider_call() {
    let (app, handles) = common::build_test_app();

    let response = post_json(
        app,
        "/api/generate",
        json!({
            "direct_urls": direct_urls(),
            "settings": { "model": "seedream_kling" }
        }),
    )
    .await;

    let json = assert_error(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(handles.gateway.submitted_count(), 0);
}

// ---------------------------------------------------------------------------
// Successful submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn direct_urls_submission_returns_task_id_and_status() {
    let (app, handles) = common::build_test_app();
    handles.gateway.script_submit(Ok(Submission {
        provider_task_id: "prov-1".into(),
        status: ProviderStatus::Created,
    }));

    let response = post_json(
        app,
        "/api/generate",
        json!({
            "direct_urls": direct_urls(),
            "settings": {}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let task_id: Uuid = json["task_id"].as_str().unwrap().parse().unwrap();
    assert_eq!(json["status"], "CREATED");
    assert_eq!(handles.gateway.submitted_count(), 1);

    // The record is persisted and retrievable.
    let record = handles.tasks.get(task_id).await.unwrap();
    assert_eq!(record.provider_task_ids, vec!["prov-1".to_string()]);
}

#[tokio::test]
async fn upload_id_submission_resolves_stored_urls() {
    let (app, handles) = common::build_test_app();

    let upload_id = Uuid::new_v4();
    handles
        .uploads
        .insert(
            upload_id,
            UploadRecord {
                character_url: "https://res.example.com/image/char.png".into(),
                reference_url: "https://res.example.com/video/ref.mp4".into(),
                character_public_id: "test/char.png".into(),
                reference_public_id: "test/ref.mp4".into(),
            },
        )
        .await
        .unwrap();

    handles.gateway.script_submit(Ok(Submission {
        provider_task_id: "prov-2".into(),
        status: ProviderStatus::Created,
    }));

    let response = post_json(
        app,
        "/api/generate",
        json!({
            "upload_id": upload_id,
            "settings": {}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let task_id: Uuid = json["task_id"].as_str().unwrap().parse().unwrap();

    let record = handles.tasks.get(task_id).await.unwrap();
    assert_eq!(
        record.character_url,
        "https://res.example.com/image/char.png"
    );
    assert_eq!(
        record.reference_url,
        "https://res.example.com/video/ref.mp4"
    );
}

// ---------------------------------------------------------------------------
// Provider failures surface as 502
// ---------------------------------------------------------------------------

#[tokio::test]
async fn provider_rejection_on_submit_returns_502() {
    let (app, handles) = common::build_test_app();
    handles.gateway.script_submit(Err(ProviderError::Api {
        status: 401,
        body: "invalid api key".into(),
    }));

    let response = post_json(
        app,
        "/api/generate",
        json!({
            "direct_urls": direct_urls(),
            "settings": {}
        }),
    )
    .await;

    let json = assert_error(response, StatusCode::BAD_GATEWAY).await;
    assert_eq!(json["code"], "PROVIDER_ERROR");
}
