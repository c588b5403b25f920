//! Inventory view state and its reducer.
//!
//! The view is plain data evolved by `apply`; callers own it and decide when
//! to feed it actions. There is no shared global state.

use serde::Serialize;

use stockroom_core::Entity;

use crate::filter::filter_items;
use crate::item::InventoryItem;

/// Whether the filtered list mirrors the full load or a search subset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Unfiltered,
    Filtered,
}

/// Inputs to the view reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    /// A full re-fetch of the collection completed.
    Loaded(Vec<InventoryItem>),
    /// The search text changed (every keystroke, no debounce).
    QueryChanged(String),
}

/// One display row of the inventory list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    pub name: String,
    pub display_name: String,
    pub quantity: i64,
}

impl From<&InventoryItem> for InventoryRow {
    fn from(item: &InventoryItem) -> Self {
        Self {
            name: item.name.as_str().to_string(),
            display_name: item.name.display(),
            quantity: item.quantity,
        }
    }
}

/// Loaded inventory, current search text and the derived filtered list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryView {
    items: Vec<InventoryItem>,
    query: String,
    filtered: Vec<InventoryItem>,
}

impl InventoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evolve the view from a single action; `filtered` is always recomputed.
    pub fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::Loaded(mut items) => {
                // The store promises no ordering; sort so listings are stable.
                items.sort_by(|a, b| a.id().cmp(b.id()));
                self.items = items;
            }
            ViewAction::QueryChanged(query) => {
                self.query = query;
            }
        }
        self.filtered = filter_items(&self.items, &self.query);
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filtered(&self) -> &[InventoryItem] {
        &self.filtered
    }

    pub fn mode(&self) -> ViewMode {
        if self.query.is_empty() {
            ViewMode::Unfiltered
        } else {
            ViewMode::Filtered
        }
    }

    /// Display rows for the filtered list.
    pub fn rows(&self) -> Vec<InventoryRow> {
        self.filtered.iter().map(InventoryRow::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemName;

    fn item(name: &str, quantity: i64) -> InventoryItem {
        InventoryItem::new(ItemName::parse(name).unwrap(), quantity)
    }

    #[test]
    fn starts_empty_and_unfiltered() {
        let view = InventoryView::new();
        assert_eq!(view.mode(), ViewMode::Unfiltered);
        assert!(view.items().is_empty());
        assert!(view.filtered().is_empty());
    }

    #[test]
    fn load_without_query_mirrors_the_full_list_sorted() {
        let mut view = InventoryView::new();
        view.apply(ViewAction::Loaded(vec![item("pear", 1), item("apple", 2)]));

        assert_eq!(view.items(), &[item("apple", 2), item("pear", 1)]);
        assert_eq!(view.filtered(), view.items());
    }

    #[test]
    fn query_moves_between_filtered_and_unfiltered() {
        let mut view = InventoryView::new();
        view.apply(ViewAction::Loaded(vec![item("Banana", 1), item("apple", 1)]));

        view.apply(ViewAction::QueryChanged("ban".into()));
        assert_eq!(view.mode(), ViewMode::Filtered);
        assert_eq!(view.filtered(), &[item("Banana", 1)]);

        view.apply(ViewAction::QueryChanged("xyz".into()));
        assert_eq!(view.mode(), ViewMode::Filtered);
        assert!(view.filtered().is_empty());

        view.apply(ViewAction::QueryChanged(String::new()));
        assert_eq!(view.mode(), ViewMode::Unfiltered);
        assert_eq!(view.filtered(), view.items());
    }

    #[test]
    fn reload_keeps_the_current_query() {
        let mut view = InventoryView::new();
        view.apply(ViewAction::QueryChanged("app".into()));
        view.apply(ViewAction::Loaded(vec![item("apple", 1), item("kiwi", 4)]));
        assert_eq!(view.filtered(), &[item("apple", 1)]);

        view.apply(ViewAction::Loaded(vec![item("kiwi", 4)]));
        assert!(view.filtered().is_empty());
        assert_eq!(view.query(), "app");
    }

    #[test]
    fn rows_capitalize_for_display_only() {
        let mut view = InventoryView::new();
        view.apply(ViewAction::Loaded(vec![item("apple", 3)]));

        let rows = view.rows();
        assert_eq!(
            rows,
            vec![InventoryRow {
                name: "apple".into(),
                display_name: "Apple".into(),
                quantity: 3,
            }]
        );
    }
}
