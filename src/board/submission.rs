use std::fmt;

use crate::encoding::{is_image_content_type, today};
use crate::models::{ImageAttachment, ItemDetails, ItemType, NewItem, RecordId};
use crate::store_client::RecordStoreClient;

use super::view::Refresh;

pub const POSTED_NOTICE: &str = "Item posted successfully!";

/// Why a report was not posted. `Display` is the message shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingItemType,
    ImageRequired,
    InvalidImageType { content_type: String },
    PostFailed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingItemType => f.write_str("Please select if the item is Lost or Found"),
            Rejection::ImageRequired => f.write_str("Please upload an image for the found item."),
            Rejection::InvalidImageType { .. } => f.write_str("Please upload a valid image file."),
            Rejection::PostFailed => f.write_str("Failed to post item. Please try again."),
        }
    }
}

impl std::error::Error for Rejection {}

/// Current contents of the report form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportForm {
    pub item_name: String,
    pub item_type: Option<ItemType>,
    pub description: String,
    pub location: String,
    pub date: String,
    pub image: Option<ImageAttachment>,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            item_name: String::new(),
            item_type: Some(ItemType::Lost),
            description: String::new(),
            location: String::new(),
            date: today(),
            image: None,
        }
    }
}

impl ReportForm {
    /// Turns the form into a record input. Checks run in order and the first
    /// failure wins. A photo picked for a lost item is ignored.
    pub fn validate(&self) -> Result<NewItem, Rejection> {
        let item_type = self.item_type.ok_or(Rejection::MissingItemType)?;
        let details = ItemDetails {
            item_name: self.item_name.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            date: self.date.clone(),
        };

        match item_type {
            ItemType::Lost => Ok(NewItem::Lost(details)),
            ItemType::Found => {
                let image = self.image.clone().ok_or(Rejection::ImageRequired)?;
                check_image(&image)?;
                Ok(NewItem::Found { details, image })
            }
        }
    }
}

fn check_image(image: &ImageAttachment) -> Result<(), Rejection> {
    if is_image_content_type(&image.content_type) {
        Ok(())
    } else {
        Err(Rejection::InvalidImageType {
            content_type: image.content_type.clone(),
        })
    }
}

/// Drives the report form: photo selection, validation, posting and reset.
pub struct SubmissionHandler {
    client: RecordStoreClient,
    form: ReportForm,
}

impl SubmissionHandler {
    pub fn new(client: RecordStoreClient) -> Self {
        Self {
            client,
            form: ReportForm::default(),
        }
    }

    pub fn form(&self) -> &ReportForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ReportForm {
        &mut self.form
    }

    /// Picks a photo. Non-image files are refused and clear the selection.
    pub fn select_image(&mut self, image: ImageAttachment) -> Result<(), Rejection> {
        if let Err(rejection) = check_image(&image) {
            tracing::debug!("Rejected image selection: file={}", image.file_name);
            self.form.image = None;
            return Err(rejection);
        }
        self.form.image = Some(image);
        Ok(())
    }

    /// Posts the form. On success the form is reset and `board` re-fetches; on
    /// failure the form is left as typed.
    pub async fn submit<R: Refresh>(&mut self, board: &mut R) -> Result<RecordId, Rejection> {
        let item = self.form.validate()?;

        let id = self.client.create(&item).await.ok_or(Rejection::PostFailed)?;

        self.form = ReportForm::default();
        tracing::info!("{} id={}", POSTED_NOTICE, id);
        board.refresh().await;
        Ok(id)
    }
}
