// Document store abstraction for the Firestore, Postgres and in-memory backends

pub mod firestore;
pub mod memory;
pub mod postgres;

pub use firestore::FirestoreBackend;
pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;

use std::sync::Arc;

use crate::config::{Config, StoreConfig};
use crate::error::AppResult;
use crate::models::{ItemDocument, ItemRecord, RecordId};

/// One collection of item documents keyed by a store-assigned id.
#[tonic::async_trait]
pub trait RecordStore: Send + Sync {
    /// Append a document and return the id the store assigned to it.
    async fn insert(&self, document: &ItemDocument) -> AppResult<RecordId>;

    /// Every document, newest `date` first.
    async fn list_by_date_desc(&self) -> AppResult<Vec<ItemRecord>>;

    async fn delete(&self, id: &RecordId) -> AppResult<()>;

    /// Cheap reachability check. Must not read the whole collection.
    async fn ping(&self) -> AppResult<()>;

    /// Collection (or table) name
    fn collection(&self) -> &str;
}

/// Connects the backend selected by the configuration.
pub async fn connect(config: &Config) -> AppResult<Arc<dyn RecordStore>> {
    let backend: Arc<dyn RecordStore> = match &config.store {
        StoreConfig::Firestore(firestore) => {
            tracing::info!(
                "Firestore store: project={}, database={}, emulator={:?}",
                firestore.project_id,
                firestore.database,
                firestore.emulator_host
            );
            Arc::new(FirestoreBackend::new(firestore, &config.collection)?)
        }
        StoreConfig::Postgres { database_url } => {
            tracing::info!("Postgres store: connecting...");
            Arc::new(PostgresBackend::connect(database_url, &config.collection).await?)
        }
        StoreConfig::Memory => {
            tracing::warn!("Memory store: records are lost on shutdown");
            Arc::new(MemoryBackend::new(&config.collection))
        }
    };
    tracing::info!("Record store ready: collection={}", backend.collection());
    Ok(backend)
}
