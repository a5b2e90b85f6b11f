pub mod config;
pub mod telemetry;

use crate::infra::config::{Config, StorageBackend};
use crate::storage::{MemoryStorage, PgStorage, Storage};
use anyhow::anyhow;
use std::sync::Arc;
use tracing::info;

/// Builds the storage backend selected by `config`.
///
/// Postgres storage gets its schema created and catalogs seeded; memory storage
/// starts with the default catalogs.
pub async fn open_storage(config: &Config) -> anyhow::Result<Arc<dyn Storage>> {
    let storage: Arc<dyn Storage> = match config.storage_backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::with_default_catalogs()),
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;
            Arc::new(PgStorage::connect(url, config.db_max_connections).await?)
        }
    };
    info!(backend = storage.backend_name(), "storage ready");
    Ok(storage)
}
