//! Inventory session: one caller's view plus the actions that drive it.
//!
//! Every action runs its store calls in sequence and then reloads the whole
//! collection into the view. Failures are logged and swallowed; the reload
//! happens either way, so callers cannot tell a failed action from a
//! successful one except through the resulting listing.

use stockroom_inventory::{InventoryView, ViewAction};

use crate::collection::InventoryCollection;
use crate::service::{InventoryService, ServiceError};

#[derive(Debug)]
pub struct InventorySession<C> {
    service: InventoryService<C>,
    view: InventoryView,
}

impl<C> InventorySession<C>
where
    C: InventoryCollection,
{
    pub fn new(service: InventoryService<C>) -> Self {
        Self {
            service,
            view: InventoryView::new(),
        }
    }

    /// Start a session with the search box already holding `query`.
    pub fn with_query(service: InventoryService<C>, query: impl Into<String>) -> Self {
        let mut session = Self::new(service);
        session.search(query);
        session
    }

    pub fn view(&self) -> &InventoryView {
        &self.view
    }

    pub fn into_view(self) -> InventoryView {
        self.view
    }

    /// Re-fetch every record. On failure the previous listing is kept.
    pub async fn load(&mut self) {
        match self.service.list().await {
            Ok(items) => self.view.apply(ViewAction::Loaded(items)),
            Err(e) => tracing::error!(error = %e, "error updating inventory"),
        }
    }

    pub async fn add(&mut self, name: &str) {
        if let Err(e) = self.service.add(name).await {
            tracing::error!(item = name, error = %e, "error adding item");
        }
        self.load().await;
    }

    pub async fn update(&mut self, name: &str, raw_quantity: &str) {
        match self.service.set_quantity(name, raw_quantity).await {
            Ok(_) => {}
            Err(ServiceError::Domain(e)) if e.is_not_found() => {
                tracing::error!(item = name, "item does not exist");
            }
            Err(e) => {
                tracing::error!(item = name, quantity = raw_quantity, error = %e, "error updating item");
            }
        }
        self.load().await;
    }

    pub async fn remove(&mut self, name: &str) {
        if let Err(e) = self.service.remove(name).await {
            tracing::error!(item = name, error = %e, "error removing item");
        }
        self.load().await;
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.view.apply(ViewAction::QueryChanged(query.into()));
    }
}
