use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Lost or Found. Serialized as `"Lost"` / `"Found"` in stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Lost,
    Found,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Lost => "Lost",
            ItemType::Found => "Found",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Lost" => Some(ItemType::Lost),
            "Found" => Some(ItemType::Found),
            _ => None,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-assigned document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields shared by every report, as typed into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetails {
    pub item_name: String,
    pub description: String,
    pub location: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp; normalized before write.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Memory(Bytes),
    File(PathBuf),
}

/// A photo picked for a found item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub source: ImageSource,
}

impl ImageAttachment {
    pub fn from_bytes(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            source: ImageSource::Memory(data.into()),
        }
    }

    pub fn from_path(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            source: ImageSource::File(path.into()),
        }
    }

    pub async fn read(&self) -> std::io::Result<Bytes> {
        match &self.source {
            ImageSource::Memory(data) => Ok(data.clone()),
            ImageSource::File(path) => tokio::fs::read(path).await.map(Bytes::from),
        }
    }
}

/// A report ready to be written. Only found items carry a photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewItem {
    Lost(ItemDetails),
    Found {
        details: ItemDetails,
        image: ImageAttachment,
    },
}

impl NewItem {
    pub fn item_type(&self) -> ItemType {
        match self {
            NewItem::Lost(_) => ItemType::Lost,
            NewItem::Found { .. } => ItemType::Found,
        }
    }

    pub fn details(&self) -> &ItemDetails {
        match self {
            NewItem::Lost(details) => details,
            NewItem::Found { details, .. } => details,
        }
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        match self {
            NewItem::Lost(_) => None,
            NewItem::Found { image, .. } => Some(image),
        }
    }
}

/// The document body as written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    pub item_name: String,
    pub item_type: ItemType,
    pub description: String,
    pub location: String,
    pub date: String,
    #[serde(rename = "imageData", default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

/// A persisted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: RecordId,
    pub item_name: String,
    pub item_type: ItemType,
    pub description: String,
    pub location: String,
    pub date: String,
    #[serde(rename = "imageData", default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

impl ItemRecord {
    pub fn from_document(id: RecordId, doc: ItemDocument) -> Self {
        Self {
            id,
            item_name: doc.item_name,
            item_type: doc.item_type,
            description: doc.description,
            location: doc.location,
            date: doc.date,
            image_data: doc.image_data,
        }
    }
}
