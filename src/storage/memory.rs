use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ItemDocument, ItemRecord, RecordId};

use super::RecordStore;

/// Process-local store. `set_unavailable` makes every call fail as if the
/// network were down.
pub struct MemoryBackend {
    collection: String,
    documents: RwLock<Vec<(RecordId, ItemDocument)>>,
    unavailable: AtomicBool,
    calls: AtomicUsize,
    listings: AtomicUsize,
}

impl MemoryBackend {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            documents: RwLock::new(Vec::new()),
            unavailable: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            listings: AtomicUsize::new(0),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of store operations attempted so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of full listings requested so far.
    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }

    pub async fn documents(&self) -> Vec<(RecordId, ItemDocument)> {
        self.documents.read().await.clone()
    }

    fn begin_call(&self) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Storage("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[tonic::async_trait]
impl RecordStore for MemoryBackend {
    async fn insert(&self, document: &ItemDocument) -> AppResult<RecordId> {
        self.begin_call()?;
        let id = RecordId::new(Uuid::new_v4().simple().to_string());
        self.documents
            .write()
            .await
            .push((id.clone(), document.clone()));
        Ok(id)
    }

    async fn list_by_date_desc(&self) -> AppResult<Vec<ItemRecord>> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        self.begin_call()?;
        let mut records: Vec<ItemRecord> = self
            .documents
            .read()
            .await
            .iter()
            .map(|(id, doc)| ItemRecord::from_document(id.clone(), doc.clone()))
            .collect();
        // Stable: equal dates keep insertion order
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn delete(&self, id: &RecordId) -> AppResult<()> {
        self.begin_call()?;
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|(existing, _)| existing != id);
        if documents.len() == before {
            return Err(AppError::NotFound(format!("item {}", id)));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.begin_call()
    }

    fn collection(&self) -> &str {
        &self.collection
    }
}
