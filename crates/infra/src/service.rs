//! Inventory mutations against a collection.
//!
//! Each operation validates its input, then performs a single atomic store
//! step: `add` is an upsert-increment, `set_quantity` an update-if-exists (or
//! delete-if-exists for zero), `remove` a delete that reports prior existence.

use stockroom_core::DomainError;
use stockroom_inventory::{InventoryItem, ItemName, parse_quantity};
use thiserror::Error;

use crate::collection::{InventoryCollection, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of a successful quantity update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The record now holds the new quantity.
    Updated(InventoryItem),
    /// The quantity was zero, so the record was deleted.
    Removed(ItemName),
}

#[derive(Debug, Clone)]
pub struct InventoryService<C> {
    collection: C,
}

impl<C> InventoryService<C>
where
    C: InventoryCollection,
{
    pub fn new(collection: C) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Every record in the collection.
    pub async fn list(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        Ok(self.collection.list_all().await?)
    }

    /// Add one unit of `name`, creating the record at 1 when it is new.
    #[tracing::instrument(skip(self), fields(collection = %self.collection.collection_id()))]
    pub async fn add(&self, name: &str) -> Result<InventoryItem, ServiceError> {
        let name = ItemName::parse(name)?;
        let quantity = self.collection.increment(&name, 1).await?;
        tracing::debug!(quantity, "item added");
        Ok(InventoryItem::new(name, quantity))
    }

    /// Overwrite the quantity of an existing record from raw form input.
    ///
    /// Zero deletes the record. Negative values are written as given. A
    /// missing record is `DomainError::NotFound` and nothing is written.
    #[tracing::instrument(skip(self), fields(collection = %self.collection.collection_id()))]
    pub async fn set_quantity(&self, name: &str, raw: &str) -> Result<QuantityUpdate, ServiceError> {
        let name = ItemName::parse(name)?;
        let quantity = parse_quantity(raw)?;

        if quantity == 0 {
            if !self.collection.delete(&name).await? {
                return Err(DomainError::not_found("item does not exist").into());
            }
            tracing::debug!("quantity set to zero; item removed");
            return Ok(QuantityUpdate::Removed(name));
        }

        if !self.collection.replace_existing(&name, quantity).await? {
            return Err(DomainError::not_found("item does not exist").into());
        }
        tracing::debug!(quantity, "quantity updated");
        Ok(QuantityUpdate::Updated(InventoryItem::new(name, quantity)))
    }

    /// Delete `name` regardless of quantity. Returns whether it existed;
    /// removing a missing item is not an error.
    #[tracing::instrument(skip(self), fields(collection = %self.collection.collection_id()))]
    pub async fn remove(&self, name: &str) -> Result<bool, ServiceError> {
        let name = ItemName::parse(name)?;
        let existed = self.collection.delete(&name).await?;
        tracing::debug!(existed, "item removed");
        Ok(existed)
    }
}
