pub mod board;
pub mod config;
pub mod db;
pub mod encoding;
pub mod error;
pub mod http_client;
pub mod models;
pub mod proto;
pub mod services;
pub mod storage;
pub mod store_client;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use store_client::RecordStoreClient;
