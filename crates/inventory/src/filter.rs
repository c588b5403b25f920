//! Search filter over the loaded inventory list.

use crate::item::InventoryItem;

/// Case-insensitive substring match of `query` against each item name.
///
/// An empty query returns the list unchanged. Order is preserved.
pub fn filter_items(items: &[InventoryItem], query: &str) -> Vec<InventoryItem> {
    if query.is_empty() {
        return items.to_vec();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.as_str().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
