//! Upload store: upload id to previously stored asset URLs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use recast_core::{CoreError, UploadRecord};

/// Storage for upload records. Consumed by the generate path to
/// resolve input references; records are never mutated.
#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn insert(&self, id: Uuid, record: UploadRecord) -> Result<(), CoreError>;

    async fn get(&self, id: Uuid) -> Result<UploadRecord, CoreError>;

    /// All records with their ids, for the debug listing endpoint.
    async fn list(&self) -> Vec<(Uuid, UploadRecord)>;
}

/// In-memory upload store backed by a `RwLock<HashMap>`.
#[derive(Default)]
pub struct MemoryUploadStore {
    records: RwLock<HashMap<Uuid, UploadRecord>>,
}

impl MemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    async fn insert(&self, id: Uuid, record: UploadRecord) -> Result<(), CoreError> {
        self.records.write().await.insert(id, record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<UploadRecord, CoreError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Upload",
                id,
            })
    }

    async fn list(&self) -> Vec<(Uuid, UploadRecord)> {
        self.records
            .read()
            .await
            .iter()
            .map(|(id, rec)| (*id, rec.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn record() -> UploadRecord {
        UploadRecord {
            character_url: "https://cdn.test/char.png".into(),
            reference_url: "https://cdn.test/ref.mp4".into(),
            character_public_id: "folder/char".into(),
            reference_public_id: "folder/ref".into(),
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = MemoryUploadStore::new();
        let id = Uuid::new_v4();
        store.insert(id, record()).await.unwrap();
        let fetched = store.get(id).await.unwrap();
        assert_eq!(fetched.character_url, "https://cdn.test/char.png");
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let store = MemoryUploadStore::new();
        assert_matches!(
            store.get(Uuid::new_v4()).await,
            Err(CoreError::NotFound {
                entity: "Upload",
                ..
            })
        );
    }
}
