//! GET /api/tasks -- debug listing of all tasks and uploads.
//!
//! No pagination or filtering; acceptable for the intended scale.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use recast_core::{TaskRecord, UploadRecord};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TaskListing {
    pub tasks: BTreeMap<String, TaskRecord>,
    pub uploads: BTreeMap<String, UploadRecord>,
}

pub async fn list_tasks(State(state): State<AppState>) -> AppResult<Json<TaskListing>> {
    let tasks = state
        .tasks
        .list()
        .await
        .into_iter()
        .map(|record| (record.id.to_string(), record))
        .collect();

    let uploads = state
        .uploads
        .list()
        .await
        .into_iter()
        .map(|(id, record)| (id.to_string(), record))
        .collect();

    Ok(Json(TaskListing { tasks, uploads }))
}
