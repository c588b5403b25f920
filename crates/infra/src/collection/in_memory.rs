use std::collections::BTreeMap;
use std::sync::RwLock;

use stockroom_core::Entity;
use stockroom_inventory::{InventoryItem, ItemName};

use super::{DEFAULT_COLLECTION, InventoryCollection, StoreError, validate_collection_id};

/// In-memory collection for tests/dev.
#[derive(Debug)]
pub struct InMemoryCollection {
    id: String,
    inner: RwLock<BTreeMap<ItemName, i64>>,
}

impl InMemoryCollection {
    pub fn new() -> Self {
        Self {
            id: DEFAULT_COLLECTION.to_string(),
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn named(id: impl Into<String>) -> Result<Self, StoreError> {
        let id = id.into();
        validate_collection_id(&id)?;
        Ok(Self {
            id,
            inner: RwLock::new(BTreeMap::new()),
        })
    }

    fn poisoned(operation: &'static str) -> StoreError {
        StoreError::backend(operation, "collection lock poisoned")
    }
}

impl Default for InMemoryCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InventoryCollection for InMemoryCollection {
    fn collection_id(&self) -> &str {
        &self.id
    }

    async fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let map = self.inner.read().map_err(|_| Self::poisoned("list_all"))?;
        Ok(map
            .iter()
            .map(|(name, quantity)| InventoryItem::new(name.clone(), *quantity))
            .collect())
    }

    async fn get(&self, name: &ItemName) -> Result<Option<InventoryItem>, StoreError> {
        let map = self.inner.read().map_err(|_| Self::poisoned("get"))?;
        Ok(map
            .get(name)
            .map(|quantity| InventoryItem::new(name.clone(), *quantity)))
    }

    async fn put(&self, item: &InventoryItem) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned("put"))?;
        map.insert(item.id().clone(), item.quantity);
        Ok(())
    }

    async fn delete(&self, name: &ItemName) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned("delete"))?;
        Ok(map.remove(name).is_some())
    }

    async fn increment(&self, name: &ItemName, delta: i64) -> Result<i64, StoreError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned("increment"))?;
        let current = map.get(name).copied().unwrap_or(0);
        let quantity = current
            .checked_add(delta)
            .ok_or_else(|| StoreError::backend("increment", "quantity overflow"))?;
        map.insert(name.clone(), quantity);
        Ok(quantity)
    }

    async fn replace_existing(&self, name: &ItemName, quantity: i64) -> Result<bool, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| Self::poisoned("replace_existing"))?;
        match map.get_mut(name) {
            Some(current) => {
                *current = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
