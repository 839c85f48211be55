//! Task store: task id to task record, no business logic.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use recast_core::{CoreError, PipelineStage, TaskRecord};

/// Storage for task records.
///
/// `replace` is a full overwrite with last-writer-wins semantics.
/// `cas_stage` exists so the pipeline coordinator can gate chained
/// submissions: only the request that successfully flips the stage may
/// submit the next provider sub-task.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a new record. Fails with `Conflict` if the id already
    /// exists (which must not happen given v4 id generation).
    async fn create(&self, record: TaskRecord) -> Result<Uuid, CoreError>;

    async fn get(&self, id: Uuid) -> Result<TaskRecord, CoreError>;

    /// Overwrite the record for `id`. Fails with `NotFound` for an
    /// unknown id.
    async fn replace(&self, id: Uuid, record: TaskRecord) -> Result<(), CoreError>;

    /// Atomically advance the stage of `id` from `expected` to `next`.
    ///
    /// Returns `true` if the stage was flipped, `false` if the stored
    /// stage no longer matches `expected` (a concurrent request won).
    async fn cas_stage(
        &self,
        id: Uuid,
        expected: PipelineStage,
        next: PipelineStage,
    ) -> Result<bool, CoreError>;

    /// All records, for the debug listing endpoint.
    async fn list(&self) -> Vec<TaskRecord>;
}

/// In-memory task store backed by a `RwLock<HashMap>`.
#[derive(Default)]
pub struct MemoryTaskStore {
    records: RwLock<HashMap<Uuid, TaskRecord>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, record: TaskRecord) -> Result<Uuid, CoreError> {
        let mut records = self.records.write().await;
        let id = record.id;
        if records.contains_key(&id) {
            return Err(CoreError::Conflict(format!("task {id} already exists")));
        }
        records.insert(id, record);
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<TaskRecord, CoreError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound { entity: "Task", id })
    }

    async fn replace(&self, id: Uuid, record: TaskRecord) -> Result<(), CoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(CoreError::NotFound { entity: "Task", id }),
        }
    }

    async fn cas_stage(
        &self,
        id: Uuid,
        expected: PipelineStage,
        next: PipelineStage,
    ) -> Result<bool, CoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .ok_or(CoreError::NotFound { entity: "Task", id })?;
        if record.stage == Some(expected) {
            record.stage = Some(next);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self) -> Vec<TaskRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use recast_core::{GenerationSettings, ProviderStatus, TaskInputs};

    use super::*;

    fn record(stage: Option<PipelineStage>) -> TaskRecord {
        TaskRecord::new(
            TaskInputs {
                character_url: "https://cdn.test/char.png".into(),
                reference_url: "https://cdn.test/ref.mp4".into(),
                frame_url: None,
            },
            GenerationSettings::default(),
            "prov-1".into(),
            ProviderStatus::Created,
            stage,
        )
    }

    #[tokio::test]
    async fn create_get_replace_round_trip() {
        let store = MemoryTaskStore::new();
        let mut rec = record(None);
        let id = store.create(rec.clone()).await.unwrap();

        let fetched = store.get(id).await.unwrap();
        assert_eq!(fetched.status, ProviderStatus::Created);

        rec.status = ProviderStatus::InProgress;
        store.replace(id, rec).await.unwrap();
        let fetched = store.get(id).await.unwrap();
        assert_eq!(fetched.status, ProviderStatus::InProgress);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let store = MemoryTaskStore::new();
        let rec = record(None);
        store.create(rec.clone()).await.unwrap();
        assert_matches!(store.create(rec).await, Err(CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let store = MemoryTaskStore::new();
        assert_matches!(
            store.get(Uuid::new_v4()).await,
            Err(CoreError::NotFound { entity: "Task", .. })
        );
    }

    #[tokio::test]
    async fn cas_stage_flips_only_on_expected() {
        let store = MemoryTaskStore::new();
        let id = store
            .create(record(Some(PipelineStage::ImageEditStarted)))
            .await
            .unwrap();

        let won = store
            .cas_stage(
                id,
                PipelineStage::ImageEditStarted,
                PipelineStage::ImageEditCompleted,
            )
            .await
            .unwrap();
        assert!(won);

        // A concurrent loser observes the already-updated stage.
        let won = store
            .cas_stage(
                id,
                PipelineStage::ImageEditStarted,
                PipelineStage::ImageEditCompleted,
            )
            .await
            .unwrap();
        assert!(!won);
        assert_eq!(
            store.get(id).await.unwrap().stage,
            Some(PipelineStage::ImageEditCompleted)
        );
    }
}
