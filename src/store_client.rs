//! Record store client used by the board and the gRPC service.
//!
//! `try_*` methods return the underlying error. The plain methods log it and
//! fall back to a sentinel (`None`, an empty list, `false`) so callers that only
//! need "worked or not" never see an error value.

use std::sync::{Arc, OnceLock};

use crate::config::Config;
use crate::encoding::{normalize_date, to_data_url};
use crate::error::{AppError, AppResult};
use crate::models::{ItemDocument, ItemRecord, NewItem, RecordId};
use crate::storage::{self, RecordStore};

static GLOBAL: OnceLock<RecordStoreClient> = OnceLock::new();

#[derive(Clone)]
pub struct RecordStoreClient {
    store: Arc<dyn RecordStore>,
}

impl RecordStoreClient {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn connect(config: &Config) -> AppResult<Self> {
        Ok(Self::new(storage::connect(config).await?))
    }

    pub fn collection(&self) -> &str {
        self.store.collection()
    }

    /// Builds the stored document: normalizes the date and, for found items,
    /// inlines the photo. An unreadable photo is dropped, not fatal.
    async fn prepare(item: &NewItem) -> AppResult<ItemDocument> {
        let details = item.details();
        let date = normalize_date(&details.date)?;

        let image_data = match item.image() {
            Some(image) => match image.read().await {
                Ok(data) => Some(to_data_url(&image.content_type, &data)),
                Err(e) => {
                    tracing::warn!(
                        "Error reading image, storing item without it: file={}, error={}",
                        image.file_name,
                        e
                    );
                    None
                }
            },
            None => None,
        };

        Ok(ItemDocument {
            item_name: details.item_name.clone(),
            item_type: item.item_type(),
            description: details.description.clone(),
            location: details.location.clone(),
            date,
            image_data,
        })
    }

    pub async fn try_create(&self, item: &NewItem) -> AppResult<RecordId> {
        let document = Self::prepare(item).await?;
        let id = self.store.insert(&document).await?;
        tracing::info!(
            "Document written: collection={}, id={}, type={}, image={}",
            self.collection(),
            id,
            document.item_type,
            document.image_data.is_some()
        );
        Ok(id)
    }

    pub async fn create(&self, item: &NewItem) -> Option<RecordId> {
        match self.try_create(item).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!("Error adding document: collection={}, error={}", self.collection(), e);
                None
            }
        }
    }

    pub async fn try_list(&self) -> AppResult<Vec<ItemRecord>> {
        let records = self.store.list_by_date_desc().await?;
        tracing::debug!("Fetched {} documents from {}", records.len(), self.collection());
        Ok(records)
    }

    pub async fn list(&self) -> Vec<ItemRecord> {
        match self.try_list().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Error getting documents: collection={}, error={}", self.collection(), e);
                Vec::new()
            }
        }
    }

    /// Reachability check that reads at most one document.
    pub async fn try_ping(&self) -> AppResult<()> {
        self.store.ping().await
    }

    /// Not used by the board; kept for operators and future flows.
    pub async fn try_delete(&self, id: &RecordId) -> AppResult<()> {
        self.store.delete(id).await?;
        tracing::info!("Document deleted: collection={}, id={}", self.collection(), id);
        Ok(())
    }

    pub async fn delete(&self, id: &RecordId) -> bool {
        match self.try_delete(id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error deleting document: id={}, error={}", id, e);
                false
            }
        }
    }
}

/// Installs the process-wide client. Fails if one is already installed.
pub fn install(client: RecordStoreClient) -> AppResult<&'static RecordStoreClient> {
    GLOBAL
        .set(client)
        .map_err(|_| AppError::Internal("record store client already initialized".into()))?;
    global()
}

/// Connects using `config` and installs the result as the process-wide client.
pub async fn init(config: &Config) -> AppResult<&'static RecordStoreClient> {
    if GLOBAL.get().is_some() {
        return Err(AppError::Internal("record store client already initialized".into()));
    }
    install(RecordStoreClient::connect(config).await?)
}

pub fn global() -> AppResult<&'static RecordStoreClient> {
    GLOBAL
        .get()
        .ok_or_else(|| AppError::Internal("record store client not initialized".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageAttachment, ItemDetails, ItemType};
    use crate::storage::MemoryBackend;

    fn details(name: &str, date: &str) -> ItemDetails {
        ItemDetails {
            item_name: name.into(),
            description: "desc".into(),
            location: "somewhere".into(),
            date: date.into(),
        }
    }

    fn client() -> (RecordStoreClient, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new("lost_found_items"));
        (RecordStoreClient::new(backend.clone()), backend)
    }

    #[tokio::test]
    async fn test_lost_item_has_no_image_and_normalized_date() {
        let (client, backend) = client();
        let id = client
            .create(&NewItem::Lost(details("Blue Backpack", "2024-03-01")))
            .await
            .unwrap();

        let docs = backend.documents().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].0, id);
        assert_eq!(docs[0].1.date, "2024-03-01T00:00:00.000Z");
        assert!(docs[0].1.image_data.is_none());
    }

    #[tokio::test]
    async fn test_found_item_inlines_image() {
        let (client, backend) = client();
        let item = NewItem::Found {
            details: details("Keys", "2024-03-02"),
            image: ImageAttachment::from_bytes("keys.png", "image/png", b"\x89PNG".to_vec()),
        };
        client.create(&item).await.unwrap();

        let doc = &backend.documents().await[0].1;
        assert_eq!(doc.item_type, ItemType::Found);
        let image = doc.image_data.as_deref().unwrap();
        assert!(image.starts_with("data:image/png;base64,"));
        assert!(image.len() > "data:image/png;base64,".len());
    }

    #[tokio::test]
    async fn test_unreadable_image_degrades() {
        let (client, backend) = client();
        let item = NewItem::Found {
            details: details("Scarf", "2024-03-02"),
            image: ImageAttachment::from_path("scarf.jpg", "image/jpeg", "/nonexistent/scarf.jpg"),
        };
        assert!(client.create(&item).await.is_some());
        let doc = &backend.documents().await[0].1;
        assert_eq!(doc.item_type, ItemType::Found);
        assert!(doc.image_data.is_none());
    }

    #[tokio::test]
    async fn test_image_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.jpg");
        std::fs::write(&path, b"jpegbytes").unwrap();

        let (client, backend) = client();
        let item = NewItem::Found {
            details: details("Wallet", "2024-03-05"),
            image: ImageAttachment::from_path("wallet.jpg", "image/jpeg", &path),
        };
        client.create(&item).await.unwrap();
        assert_eq!(
            backend.documents().await[0].1.image_data.as_deref(),
            Some("data:image/jpeg;base64,anBlZ2J5dGVz")
        );
    }

    #[tokio::test]
    async fn test_invalid_date_fails_without_write() {
        let (client, backend) = client();
        let item = NewItem::Lost(details("Hat", "not a date"));
        assert!(matches!(client.try_create(&item).await, Err(AppError::InvalidInput(_))));
        assert!(client.create(&item).await.is_none());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_yields_sentinels() {
        let (client, backend) = client();
        backend.set_unavailable(true);
        assert!(client.create(&NewItem::Lost(details("Hat", "2024-01-01"))).await.is_none());
        assert!(client.list().await.is_empty());
        assert!(client.try_list().await.is_err());
        assert!(!client.delete(&RecordId::new("missing")).await);
    }

    #[tokio::test]
    async fn test_ping_does_not_list() {
        let (client, backend) = client();
        client.try_ping().await.unwrap();
        assert_eq!(backend.calls(), 1);
        assert_eq!(backend.listings(), 0);

        backend.set_unavailable(true);
        assert!(client.try_ping().await.is_err());
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_repeatable() {
        let (client, _) = client();
        for (name, date) in [("a", "2024-01-05"), ("b", "2024-02-01"), ("c", "2023-12-25")] {
            client.create(&NewItem::Lost(details(name, date))).await.unwrap();
        }
        let first = client.list().await;
        let second = client.list().await;
        assert_eq!(first, second);
        let names: Vec<&str> = first.iter().map(|r| r.item_name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_delete_is_available() {
        let (client, _) = client();
        let id = client.create(&NewItem::Lost(details("a", "2024-01-05"))).await.unwrap();
        assert!(client.delete(&id).await);
        assert!(client.list().await.is_empty());
    }

    #[test]
    fn test_global_installs_once() {
        let (first, _) = client();
        let (second, _) = client();
        assert!(install(first).is_ok());
        assert!(global().is_ok());
        assert!(matches!(install(second), Err(AppError::Internal(_))));
    }
}
