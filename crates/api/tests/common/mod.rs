use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use recast_api::config::ServerConfig;
use recast_api::router::build_app_router;
use recast_api::state::AppState;
use recast_pipeline::PipelineCoordinator;
use recast_provider::{
    PollResult, ProviderEndpoint, ProviderError, ProviderGateway, Submission, SubmitJob,
};
use recast_storage::{ResourceType, StorageClient, StorageError, StoredAsset};
use recast_store::{MemoryTaskStore, MemoryUploadStore, TaskStore, UploadStore};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        mock_mode: false,
    }
}

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// A gateway that replays scripted responses in order and records every
/// submitted job.
#[derive(Default)]
pub struct ScriptedGateway {
    submits: Mutex<VecDeque<Result<Submission, ProviderError>>>,
    polls: Mutex<VecDeque<Result<PollResult, ProviderError>>>,
    submitted: Mutex<Vec<SubmitJob>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_submit(&self, response: Result<Submission, ProviderError>) {
        self.submits.lock().unwrap().push_back(response);
    }

    pub fn script_poll(&self, response: Result<PollResult, ProviderError>) {
        self.polls.lock().unwrap().push_back(response);
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl ProviderGateway for ScriptedGateway {
    async fn submit(&self, job: SubmitJob) -> Result<Submission, ProviderError> {
        self.submitted.lock().unwrap().push(job);
        self.submits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected submit call"))
    }

    async fn poll(
        &self,
        _provider_task_id: &str,
        _endpoint: ProviderEndpoint,
    ) -> Result<PollResult, ProviderError> {
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected poll call"))
    }
}

/// A storage client that never touches the network: each upload gets a
/// deterministic fake URL derived from the filename.
pub struct NullStorage;

#[async_trait]
impl StorageClient for NullStorage {
    async fn upload(
        &self,
        _bytes: Vec<u8>,
        filename: &str,
        resource_type: ResourceType,
    ) -> Result<StoredAsset, StorageError> {
        Ok(StoredAsset {
            url: format!(
                "https://res.example.com/{}/{filename}",
                resource_type.as_str()
            ),
            public_id: format!("test/{filename}"),
        })
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Handles into the app's shared state, so tests can seed stores and
/// inspect the gateway.
pub struct TestHandles {
    pub gateway: Arc<ScriptedGateway>,
    pub tasks: Arc<dyn TaskStore>,
    pub uploads: Arc<MemoryUploadStore>,
}

/// Build the full application router with all middleware layers.
///
/// This calls the same `build_app_router` that `main.rs` uses, so
/// integration tests exercise the production middleware stack (CORS,
/// request ID, timeout, tracing, panic recovery).
pub fn build_test_app() -> (Router, TestHandles) {
    let config = test_config();

    let gateway = Arc::new(ScriptedGateway::new());
    let tasks: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());
    let uploads = Arc::new(MemoryUploadStore::new());
    let coordinator = Arc::new(PipelineCoordinator::new(
        Arc::clone(&tasks),
        gateway.clone() as Arc<dyn ProviderGateway>,
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        tasks: Arc::clone(&tasks),
        uploads: uploads.clone() as Arc<dyn UploadStore>,
        coordinator,
        storage: Arc::new(NullStorage),
    };

    let app = build_app_router(state, &config);

    (
        app,
        TestHandles {
            gateway,
            tasks,
            uploads,
        },
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and return the raw response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read and parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the response status and return the parsed error body.
pub async fn assert_error(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert!(json["error"].is_string(), "error body: {json}");
    json
}
