use std::env;

use crate::error::{AppError, AppResult};

pub const DEFAULT_COLLECTION: &str = "lost_found_items";
pub const DEFAULT_FIRESTORE_DATABASE: &str = "(default)";
const DEFAULT_PORT: u16 = 50051;

/// Connection parameters for the Firestore REST backend.
#[derive(Clone, Debug, PartialEq)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: Option<String>,
    pub database: String,
    pub emulator_host: Option<String>,
}

impl FirestoreConfig {
    /// Base URL of the documents resource, e.g.
    /// `https://firestore.googleapis.com/v1/projects/p/databases/(default)/documents`.
    pub fn documents_url(&self) -> String {
        let origin = match &self.emulator_host {
            Some(host) => format!("http://{}", host),
            None => "https://firestore.googleapis.com".to_string(),
        };
        format!(
            "{}/v1/projects/{}/databases/{}/documents",
            origin, self.project_id, self.database
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StoreConfig {
    Firestore(FirestoreConfig),
    Postgres { database_url: String },
    Memory,
}

impl StoreConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreConfig::Firestore(_) => "firestore",
            StoreConfig::Postgres { .. } => "postgres",
            StoreConfig::Memory => "memory",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub collection: String,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store = match var("STORE_BACKEND").as_deref() {
            Some("firestore") => StoreConfig::Firestore(Self::firestore(&var)?),
            Some("postgres") => StoreConfig::Postgres {
                database_url: var("DATABASE_URL").ok_or_else(|| {
                    AppError::Config("DATABASE_URL is required for the postgres backend".into())
                })?,
            },
            Some("memory") => StoreConfig::Memory,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "unknown STORE_BACKEND '{}', expected firestore, postgres or memory",
                    other
                )))
            }
            None => {
                if var("FIRESTORE_PROJECT_ID").is_some() {
                    StoreConfig::Firestore(Self::firestore(&var)?)
                } else if let Some(database_url) = var("DATABASE_URL") {
                    StoreConfig::Postgres { database_url }
                } else {
                    return Err(AppError::Config(
                        "no store configured: set FIRESTORE_PROJECT_ID or DATABASE_URL".into(),
                    ));
                }
            }
        };

        Ok(Config {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: var("SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            collection: var("ITEMS_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            store,
        })
    }

    fn firestore<F>(var: &F) -> AppResult<FirestoreConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(FirestoreConfig {
            project_id: var("FIRESTORE_PROJECT_ID").ok_or_else(|| {
                AppError::Config("FIRESTORE_PROJECT_ID is required for the firestore backend".into())
            })?,
            api_key: var("FIRESTORE_API_KEY"),
            database: var("FIRESTORE_DATABASE")
                .unwrap_or_else(|| DEFAULT_FIRESTORE_DATABASE.to_string()),
            emulator_host: var("FIRESTORE_EMULATOR_HOST"),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
