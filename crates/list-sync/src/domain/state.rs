//! Remote State Payloads
//!
//! Page results, the persisted snapshot and partial persistence patches.
//! Field names follow the remote API (camelCase).

use serde::{Deserialize, Serialize};

use super::filter::Filter;
use super::item::{Item, ItemId};

/// One batch returned by `fetch_items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<Item>,
    pub has_more: bool,
}

impl Page {
    pub fn new(items: Vec<Item>, has_more: bool) -> Self {
        Self { items, has_more }
    }
}

/// Server-held state used for hydration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    #[serde(default)]
    pub sorted_items: Vec<Item>,
    #[serde(default)]
    pub selected_items: Vec<ItemId>,
    #[serde(default)]
    pub filter: Filter,
}

/// Partial state sent to `persist_state`
///
/// Each populated field is a full snapshot of that field, so concurrent
/// patches resolve as last-write-wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_items: Option<Vec<ItemId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorted_items: Option<Vec<Item>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl StatePatch {
    pub fn selection(selected: Vec<ItemId>) -> Self {
        Self {
            selected_items: Some(selected),
            ..Default::default()
        }
    }

    pub fn ordering(items: Vec<Item>) -> Self {
        Self {
            sorted_items: Some(items),
            ..Default::default()
        }
    }

    pub fn filter(filter: Filter) -> Self {
        Self {
            filter: Some(filter),
            ..Default::default()
        }
    }

    /// Overlay this patch onto a stored snapshot
    pub fn apply_to(&self, snapshot: &mut PersistedSnapshot) {
        if let Some(selected) = &self.selected_items {
            snapshot.selected_items = selected.clone();
        }
        if let Some(sorted) = &self.sorted_items {
            snapshot.sorted_items = sorted.clone();
        }
        if let Some(filter) = &self.filter {
            snapshot.filter = filter.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_serializes_only_changed_slice() {
        let json = serde_json::to_string(&StatePatch::selection(vec![3, 1])).unwrap();
        assert_eq!(json, r#"{"selectedItems":[3,1]}"#);
    }

    #[test]
    fn test_snapshot_tolerates_missing_fields() {
        let snapshot: PersistedSnapshot =
            serde_json::from_str(r#"{"sortedItems":[{"value":1,"order":1}]}"#).unwrap();
        assert_eq!(snapshot.sorted_items.len(), 1);
        assert!(snapshot.selected_items.is_empty());
        assert_eq!(snapshot.filter, Filter::default());
    }

    #[test]
    fn test_page_wire_names() {
        let page: Page = serde_json::from_str(r#"{"items":[],"hasMore":true}"#).unwrap();
        assert!(page.has_more);
    }

    #[test]
    fn test_apply_patch() {
        let mut snapshot = PersistedSnapshot::default();
        StatePatch::selection(vec![9]).apply_to(&mut snapshot);
        StatePatch::filter(Filter::search("x")).apply_to(&mut snapshot);
        assert_eq!(snapshot.selected_items, vec![9]);
        assert_eq!(snapshot.filter, Filter::search("x"));
        assert!(snapshot.sorted_items.is_empty());
    }
}
