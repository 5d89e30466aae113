use tonic::{Request, Response, Status};

use crate::proto::health::{
    health_check_response::ServingStatus, health_server::Health, HealthCheckRequest,
    HealthCheckResponse,
};
use crate::store_client::RecordStoreClient;

pub const ITEMS_SERVICE_NAME: &str = "board.v1.ItemsService";

/// Reports SERVING while the record store answers a one-document read.
pub struct HealthServiceImpl {
    client: RecordStoreClient,
}

impl HealthServiceImpl {
    pub fn new(client: RecordStoreClient) -> Self {
        Self { client }
    }

    async fn status_for(&self, service: &str) -> ServingStatus {
        if !service.is_empty() && service != ITEMS_SERVICE_NAME {
            return ServingStatus::ServiceUnknown;
        }
        match self.client.try_ping().await {
            Ok(_) => ServingStatus::Serving,
            Err(e) => {
                tracing::warn!("Health check: record store unreachable: {}", e);
                ServingStatus::NotServing
            }
        }
    }
}

#[tonic::async_trait]
impl Health for HealthServiceImpl {
    async fn check(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        let status = self.status_for(&request.into_inner().service).await;
        Ok(Response::new(HealthCheckResponse {
            status: status.into(),
        }))
    }

    type WatchStream = tokio_stream::wrappers::ReceiverStream<Result<HealthCheckResponse, Status>>;

    async fn watch(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        let status = self.status_for(&request.into_inner().service).await;
        let (tx, rx) = tokio::sync::mpsc::channel(1);

        tokio::spawn(async move {
            let _ = tx
                .send(Ok(HealthCheckResponse {
                    status: status.into(),
                }))
                .await;
        });

        Ok(Response::new(tokio_stream::wrappers::ReceiverStream::new(rx)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio_stream::StreamExt;

    use super::*;
    use crate::storage::MemoryBackend;

    fn service() -> (HealthServiceImpl, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new("lost_found_items"));
        (
            HealthServiceImpl::new(RecordStoreClient::new(backend.clone())),
            backend,
        )
    }

    async fn check(svc: &HealthServiceImpl, service: &str) -> ServingStatus {
        let res = svc
            .check(Request::new(HealthCheckRequest {
                service: service.into(),
            }))
            .await
            .unwrap()
            .into_inner();
        res.status()
    }

    #[tokio::test]
    async fn test_serving_when_store_answers() {
        let (svc, _) = service();
        assert_eq!(check(&svc, "").await, ServingStatus::Serving);
        assert_eq!(check(&svc, ITEMS_SERVICE_NAME).await, ServingStatus::Serving);
    }

    #[tokio::test]
    async fn test_check_does_not_list_collection() {
        let (svc, backend) = service();
        for _ in 0..3 {
            assert_eq!(check(&svc, "").await, ServingStatus::Serving);
        }
        assert_eq!(backend.calls(), 3);
        assert_eq!(backend.listings(), 0);
    }

    #[tokio::test]
    async fn test_watch_sends_current_status() {
        let (svc, backend) = service();
        let mut stream = svc
            .watch(Request::new(HealthCheckRequest {
                service: ITEMS_SERVICE_NAME.into(),
            }))
            .await
            .unwrap()
            .into_inner();

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.status(), ServingStatus::Serving);
        assert!(stream.next().await.is_none());
        assert_eq!(backend.listings(), 0);
    }

    #[tokio::test]
    async fn test_watch_reports_store_down() {
        let (svc, backend) = service();
        backend.set_unavailable(true);
        let mut stream = svc
            .watch(Request::new(HealthCheckRequest::default()))
            .await
            .unwrap()
            .into_inner();
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.status(), ServingStatus::NotServing);
    }

    #[tokio::test]
    async fn test_not_serving_when_store_down() {
        let (svc, backend) = service();
        backend.set_unavailable(true);
        assert_eq!(check(&svc, "").await, ServingStatus::NotServing);
    }

    #[tokio::test]
    async fn test_unknown_service() {
        let (svc, backend) = service();
        assert_eq!(check(&svc, "other.Service").await, ServingStatus::ServiceUnknown);
        assert_eq!(backend.calls(), 0);
    }
}
