//! Area Monitor Backend
//!
//! Layered architecture:
//! - domain: Core entities, snapshot mutations and the query engine
//! - repository: Key-value backends and snapshot persistence
//! - store: The owned per-session store
//! - interchange: JSON/CSV export and import
//! - commands: Handlers the front end calls

use std::sync::Arc;

use tokio::sync::Mutex;

pub mod domain;
pub mod repository;
pub mod store;
pub mod interchange;
pub mod commands;
pub mod config;
pub mod auth;

use auth::{Authenticator, ConfiguredCredentials};
use config::{AppConfig, BackendKind};
use domain::AreaTaxonomy;
use repository::{KeyValueStore, MemoryKvStore, SnapshotRepository, SqliteKvStore};
use store::MonitorStore;

/// Application state shared across commands
pub struct AppState {
    pub store: Mutex<MonitorStore>,
    pub config: AppConfig,
    pub taxonomy: AreaTaxonomy,
    authenticator: Box<dyn Authenticator>,
}

impl AppState {
    /// Open the configured backend and load the store
    pub async fn init(config: AppConfig) -> Result<Self, String> {
        let kv: Arc<dyn KeyValueStore> = match config.backend {
            BackendKind::Sqlite => {
                let db_path = config.db_path();
                log::info!("Opening store at {}", db_path.display());
                Arc::new(SqliteKvStore::open(&db_path).await?)
            }
            BackendKind::Memory => {
                log::info!("Using in-memory store");
                Arc::new(MemoryKvStore::new())
            }
        };
        Ok(Self::with_backend(config, kv).await)
    }

    /// Load the store from an already-built backend
    pub async fn with_backend(config: AppConfig, kv: Arc<dyn KeyValueStore>) -> Self {
        let authenticator = Box::new(ConfiguredCredentials::new(config.credentials.clone()));
        Self::with_authenticator(config, kv, authenticator).await
    }

    pub async fn with_authenticator(
        config: AppConfig,
        kv: Arc<dyn KeyValueStore>,
        authenticator: Box<dyn Authenticator>,
    ) -> Self {
        let repo = SnapshotRepository::new(kv, config.storage_key.clone());
        let store = MonitorStore::open(repo).await;
        Self {
            store: Mutex::new(store),
            config,
            taxonomy: AreaTaxonomy,
            authenticator,
        }
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }
}

/// Start the rolling file logger in the configured log directory
pub fn init_logging(config: &AppConfig) -> Result<(), String> {
    rolling_logger::init_logger(config.log_dir(), "AreaMonitor")
}
