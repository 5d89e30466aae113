use std::net::SocketAddr;

use anyhow::Context;
use lost_found_board::config::Config;
use lost_found_board::proto::board::items_service_server::ItemsServiceServer;
use lost_found_board::proto::health::health_server::HealthServer;
use lost_found_board::services::{HealthServiceImpl, ItemsServiceImpl};
use lost_found_board::store_client;

use tonic::transport::Server;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lost_found_board=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    tracing::info!("Starting lost-found-board gRPC server...");
    tracing::info!("Connecting to {} record store...", config.store.kind());

    let client = store_client::init(&config)
        .await
        .context("failed to initialize record store")?
        .clone();

    let items_service = ItemsServiceImpl::new(client.clone());
    let health_service = HealthServiceImpl::new(client);

    // CORS layer for gRPC-Web
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
        .expose_headers(Any);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;
    tracing::info!("Listening on {}", addr);

    Server::builder()
        .accept_http1(true) // Required for gRPC-Web
        .layer(cors)
        .layer(tonic_web::GrpcWebLayer::new())
        .add_service(ItemsServiceServer::new(items_service))
        .add_service(HealthServer::new(health_service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
