use tonic::{Request, Response, Status};

use crate::board::{partition, Rejection, ReportForm};
use crate::encoding::today;
use crate::error::AppError;
use crate::models::{ImageAttachment, ItemRecord, ItemType};
use crate::proto::board::items_service_server::ItemsService;
use crate::proto::board::{
    self as pb, BoardResponse, CreateItemRequest, CreateItemResponse, Empty, Item,
    ListItemsResponse,
};
use crate::store_client::RecordStoreClient;

pub struct ItemsServiceImpl {
    client: RecordStoreClient,
}

impl ItemsServiceImpl {
    pub fn new(client: RecordStoreClient) -> Self {
        Self { client }
    }

    fn record_to_proto(record: &ItemRecord) -> Item {
        Item {
            id: record.id.to_string(),
            item_name: record.item_name.clone(),
            item_type: Self::type_to_proto(record.item_type) as i32,
            description: record.description.clone(),
            location: record.location.clone(),
            date: record.date.clone(),
            image_data: record.image_data.clone(),
        }
    }

    fn type_to_proto(item_type: ItemType) -> pb::ItemType {
        match item_type {
            ItemType::Lost => pb::ItemType::Lost,
            ItemType::Found => pb::ItemType::Found,
        }
    }

    fn type_from_proto(value: i32) -> Option<ItemType> {
        match pb::ItemType::try_from(value).ok()? {
            pb::ItemType::Lost => Some(ItemType::Lost),
            pb::ItemType::Found => Some(ItemType::Found),
            pb::ItemType::Unspecified => None,
        }
    }

    /// Maps the request onto the report form. An empty date means today.
    fn request_to_form(req: CreateItemRequest) -> ReportForm {
        ReportForm {
            item_name: req.item_name,
            item_type: Self::type_from_proto(req.item_type),
            description: req.description,
            location: req.location,
            date: if req.date.trim().is_empty() {
                today()
            } else {
                req.date
            },
            image: req
                .image
                .map(|img| ImageAttachment::from_bytes(img.file_name, img.content_type, img.data)),
        }
    }
}

#[tonic::async_trait]
impl ItemsService for ItemsServiceImpl {
    async fn create_item(
        &self,
        request: Request<CreateItemRequest>,
    ) -> Result<Response<CreateItemResponse>, Status> {
        let form = Self::request_to_form(request.into_inner());
        let item = form
            .validate()
            .map_err(|rejection| Status::invalid_argument(rejection.to_string()))?;

        tracing::info!(
            "CreateItem: name={}, type={}",
            item.details().item_name,
            item.item_type()
        );

        match self.client.try_create(&item).await {
            Ok(id) => Ok(Response::new(CreateItemResponse { id: id.to_string() })),
            Err(AppError::InvalidInput(msg)) => Err(Status::invalid_argument(msg)),
            Err(e) => {
                tracing::error!("CreateItem failed: {}", e);
                Err(Status::unavailable(Rejection::PostFailed.to_string()))
            }
        }
    }

    async fn list_items(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<ListItemsResponse>, Status> {
        let records = self.client.list().await;
        let items = records.iter().map(Self::record_to_proto).collect();
        Ok(Response::new(ListItemsResponse { items }))
    }

    async fn get_board(&self, _request: Request<Empty>) -> Result<Response<BoardResponse>, Status> {
        let records = self.client.list().await;
        let parts = partition(&records);
        let convert = |list: &[&ItemRecord]| -> Vec<Item> {
            list.iter().map(|record| Self::record_to_proto(record)).collect()
        };

        Ok(Response::new(BoardResponse {
            all: convert(&parts.all),
            lost: convert(&parts.lost),
            found: convert(&parts.found),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::proto::board::ImageUpload;
    use crate::storage::MemoryBackend;
    use tonic::Code;

    fn service() -> (ItemsServiceImpl, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new("lost_found_items"));
        (
            ItemsServiceImpl::new(RecordStoreClient::new(backend.clone())),
            backend,
        )
    }

    fn request(name: &str, item_type: pb::ItemType, date: &str) -> CreateItemRequest {
        CreateItemRequest {
            item_name: name.into(),
            item_type: item_type as i32,
            description: "desc".into(),
            location: "Library".into(),
            date: date.into(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (svc, _) = service();
        let created = svc
            .create_item(Request::new(request("Blue Backpack", pb::ItemType::Lost, "2024-03-01")))
            .await
            .unwrap()
            .into_inner();
        assert!(!created.id.is_empty());

        let listed = svc.list_items(Request::new(Empty {})).await.unwrap().into_inner();
        assert_eq!(listed.items.len(), 1);
        let item = &listed.items[0];
        assert_eq!(item.id, created.id);
        assert_eq!(item.item_type(), pb::ItemType::Lost);
        assert_eq!(item.date, "2024-03-01T00:00:00.000Z");
        assert!(item.image_data.is_none());
    }

    #[tokio::test]
    async fn test_found_without_image_is_rejected_before_store() {
        let (svc, backend) = service();
        let status = svc
            .create_item(Request::new(request("Keys", pb::ItemType::Found, "2024-03-01")))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "Please upload an image for the found item.");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_unspecified_type_is_rejected() {
        let (svc, backend) = service();
        let status = svc
            .create_item(Request::new(request("Keys", pb::ItemType::Unspecified, "2024-03-01")))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_found_with_image() {
        let (svc, _) = service();
        let mut req = request("Keys", pb::ItemType::Found, "2024-03-01");
        req.image = Some(ImageUpload {
            file_name: "keys.png".into(),
            content_type: "image/png".into(),
            data: vec![1, 2, 3],
        });
        svc.create_item(Request::new(req)).await.unwrap();

        let board = svc.get_board(Request::new(Empty {})).await.unwrap().into_inner();
        assert_eq!(board.found.len(), 1);
        assert!(board.lost.is_empty());
        assert_eq!(
            board.found[0].image_data.as_deref(),
            Some("data:image/png;base64,AQID")
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_generic() {
        let (svc, backend) = service();
        backend.set_unavailable(true);
        let status = svc
            .create_item(Request::new(request("Hat", pb::ItemType::Lost, "2024-03-01")))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unavailable);
        assert_eq!(status.message(), "Failed to post item. Please try again.");

        let board = svc.get_board(Request::new(Empty {})).await.unwrap().into_inner();
        assert!(board.all.is_empty());
    }

    #[tokio::test]
    async fn test_bad_date_is_invalid_argument() {
        let (svc, _) = service();
        let status = svc
            .create_item(Request::new(request("Hat", pb::ItemType::Lost, "someday")))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_board_partitions() {
        let (svc, _) = service();
        svc.create_item(Request::new(request("a", pb::ItemType::Lost, "2024-03-01")))
            .await
            .unwrap();
        svc.create_item(Request::new(request("b", pb::ItemType::Lost, "2024-03-03")))
            .await
            .unwrap();
        let mut found = request("c", pb::ItemType::Found, "2024-03-02");
        found.image = Some(ImageUpload {
            file_name: "c.jpg".into(),
            content_type: "image/jpeg".into(),
            data: vec![0xff],
        });
        svc.create_item(Request::new(found)).await.unwrap();

        let board = svc.get_board(Request::new(Empty {})).await.unwrap().into_inner();
        let names = |items: &[Item]| items.iter().map(|i| i.item_name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&board.all), vec!["b", "c", "a"]);
        assert_eq!(names(&board.lost), vec!["b", "a"]);
        assert_eq!(names(&board.found), vec!["c"]);
        assert_eq!(board.all.len(), board.lost.len() + board.found.len());
    }
}
