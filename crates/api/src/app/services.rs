use std::sync::Arc;

use stockroom_infra::{
    InMemoryCollection, InventoryCollection, InventoryService, InventorySession,
    PostgresCollection, StoreError,
};

use crate::config::ApiConfig;

/// Type-erased collection so one router serves either backend.
pub type SharedCollection = Arc<dyn InventoryCollection>;

pub struct AppServices {
    inventory: InventoryService<SharedCollection>,
}

impl AppServices {
    pub fn new(collection: SharedCollection) -> Self {
        Self {
            inventory: InventoryService::new(collection),
        }
    }

    /// Services over a fresh in-memory collection (dev and tests).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCollection::new()))
    }

    /// A per-request session whose search box holds `search`.
    pub fn session(&self, search: Option<String>) -> InventorySession<SharedCollection> {
        InventorySession::with_query(self.inventory.clone(), search.unwrap_or_default())
    }
}

/// Select the collection backend from configuration.
pub async fn build_services(config: &ApiConfig) -> Result<AppServices, StoreError> {
    let collection: SharedCollection = match &config.database_url {
        Some(url) => {
            let pg =
                PostgresCollection::connect(url, config.db_max_connections, &config.collection)
                    .await?;
            pg.ensure_schema().await?;
            tracing::info!(collection = %config.collection, "using postgres collection");
            Arc::new(pg)
        }
        None => {
            tracing::info!(collection = %config.collection, "using in-memory collection");
            Arc::new(InMemoryCollection::named(&config.collection)?)
        }
    };
    Ok(AppServices::new(collection))
}
