//! Inventory domain module.
//!
//! This crate contains the inventory record model, quantity parsing, the
//! search filter and the view state, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod filter;
pub mod item;
pub mod view;

pub use filter::filter_items;
pub use item::{InventoryItem, ItemName, display_name, parse_quantity};
pub use view::{InventoryRow, InventoryView, ViewAction, ViewMode};
