//! Infrastructure layer: document collections, inventory service, sessions.

pub mod collection;
pub mod service;
pub mod session;

pub use collection::{
    DEFAULT_COLLECTION, InMemoryCollection, InventoryCollection, PostgresCollection, StoreError,
};
pub use service::{InventoryService, QuantityUpdate, ServiceError};
pub use session::InventorySession;
