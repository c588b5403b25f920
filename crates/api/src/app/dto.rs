use serde::{Deserialize, Serialize};

use stockroom_inventory::{InventoryRow, InventoryView, ViewMode};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
}

/// The quantity field is free text in the update form; JSON numbers are
/// accepted too and go through the same parsing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Text(String),
    Number(serde_json::Number),
}

impl RawQuantity {
    pub fn into_text(self) -> String {
        match self {
            RawQuantity::Text(s) => s,
            RawQuantity::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: RawQuantity,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub mode: ViewMode,
    pub search: String,
    pub count: usize,
    pub items: Vec<InventoryRow>,
}

impl From<&InventoryView> for InventoryResponse {
    fn from(view: &InventoryView) -> Self {
        let items = view.rows();
        Self {
            mode: view.mode(),
            search: view.query().to_string(),
            count: items.len(),
            items,
        }
    }
}
