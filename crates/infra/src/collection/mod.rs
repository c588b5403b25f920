//! Document collection storage for inventory records.
//!
//! A collection is keyed by item name and holds one numeric field per record
//! (`quantity`). Implementations must be safe to share across tasks.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryCollection;
pub use postgres::PostgresCollection;

use std::sync::Arc;

use stockroom_inventory::{InventoryItem, ItemName};
use thiserror::Error;

/// Collection identifier used when none is configured.
pub const DEFAULT_COLLECTION: &str = "inventory";

const MAX_COLLECTION_LEN: usize = 63;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    #[error("corrupt record {name:?}: {message}")]
    Corrupt { name: String, message: String },

    #[error("invalid collection identifier: {0}")]
    InvalidCollection(String),
}

impl StoreError {
    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
        }
    }
}

/// Check a collection identifier: `[A-Za-z_][A-Za-z0-9_]*`, at most 63 bytes.
///
/// The identifier becomes a table name in SQL backends, so nothing outside
/// this alphabet is accepted.
pub fn validate_collection_id(id: &str) -> Result<(), StoreError> {
    let mut chars = id.chars();
    let valid_head = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_head || !valid_tail || id.len() > MAX_COLLECTION_LEN {
        return Err(StoreError::InvalidCollection(id.to_string()));
    }
    Ok(())
}

/// Remote document collection of inventory records.
///
/// `list_all`, `get`, `put` and `delete` are the plain document operations.
/// `increment` and `replace_existing` are single atomic steps so callers never
/// need a separate read before a write.
#[async_trait::async_trait]
pub trait InventoryCollection: Send + Sync {
    /// Fixed identifier of the underlying collection.
    fn collection_id(&self) -> &str;

    /// Every record, in no particular order.
    async fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError>;

    async fn get(&self, name: &ItemName) -> Result<Option<InventoryItem>, StoreError>;

    /// Full overwrite of the record's fields (creates it when absent).
    async fn put(&self, item: &InventoryItem) -> Result<(), StoreError>;

    /// Remove the record; returns whether it existed.
    async fn delete(&self, name: &ItemName) -> Result<bool, StoreError>;

    /// Add `delta` to the record's quantity, creating it at `delta` when
    /// absent. Returns the new quantity.
    async fn increment(&self, name: &ItemName, delta: i64) -> Result<i64, StoreError>;

    /// Overwrite the quantity only if the record exists; returns whether it did.
    async fn replace_existing(&self, name: &ItemName, quantity: i64) -> Result<bool, StoreError>;
}

#[async_trait::async_trait]
impl<S> InventoryCollection for Arc<S>
where
    S: InventoryCollection + ?Sized,
{
    fn collection_id(&self) -> &str {
        (**self).collection_id()
    }

    async fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        (**self).list_all().await
    }

    async fn get(&self, name: &ItemName) -> Result<Option<InventoryItem>, StoreError> {
        (**self).get(name).await
    }

    async fn put(&self, item: &InventoryItem) -> Result<(), StoreError> {
        (**self).put(item).await
    }

    async fn delete(&self, name: &ItemName) -> Result<bool, StoreError> {
        (**self).delete(name).await
    }

    async fn increment(&self, name: &ItemName, delta: i64) -> Result<i64, StoreError> {
        (**self).increment(name, delta).await
    }

    async fn replace_existing(&self, name: &ItemName, quantity: i64) -> Result<bool, StoreError> {
        (**self).replace_existing(name, quantity).await
    }
}
