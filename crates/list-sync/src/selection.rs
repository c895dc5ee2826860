//! Selection Set
//!
//! Multi-select over item identities. Selection order is kept so persisted
//! snapshots read the way the user built them.
//!
//! Identities are never pruned: an item evicted by a filter reset stays
//! selected and shows up checked again once it is reloaded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Item, ItemId};

/// Checkbox gestures reported by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionGesture {
    /// Row checkbox
    Toggle(ItemId),
    /// Select every loaded item
    SelectAll,
    /// Empty the selection
    ClearAll,
    /// Header checkbox: select all unless everything loaded is selected
    ToggleAll,
}

/// Tri-state for the header checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectAllState {
    #[default]
    Unchecked,
    Indeterminate,
    Checked,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    order: Vec<ItemId>,
    members: HashSet<ItemId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted list, dropping duplicates
    pub fn from_snapshot(ids: impl IntoIterator<Item = ItemId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    fn insert(&mut self, id: ItemId) -> bool {
        let added = self.members.insert(id);
        if added {
            self.order.push(id);
        }
        added
    }

    /// Flip membership; returns whether `id` is now selected
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.members.remove(&id) {
            self.order.retain(|selected| *selected != id);
            false
        } else {
            self.insert(id)
        }
    }

    /// Replace the selection with exactly `ids`
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        self.clear_all();
        for id in ids {
            self.insert(id);
        }
    }

    pub fn clear_all(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identities in selection order
    pub fn ids(&self) -> &[ItemId] {
        &self.order
    }

    pub fn snapshot(&self) -> Vec<ItemId> {
        self.order.clone()
    }

    /// Header checkbox state relative to the loaded rows
    pub fn header_state(&self, loaded: &[Item]) -> SelectAllState {
        let selected = loaded.iter().filter(|item| self.contains(item.value)).count();
        if selected == 0 {
            SelectAllState::Unchecked
        } else if selected == loaded.len() {
            SelectAllState::Checked
        } else {
            SelectAllState::Indeterminate
        }
    }

    /// Apply a gesture against the loaded rows
    pub fn apply(&mut self, gesture: SelectionGesture, loaded: &[Item]) {
        match gesture {
            SelectionGesture::Toggle(id) => {
                self.toggle(id);
            }
            SelectionGesture::SelectAll => self.select_all(loaded.iter().map(|item| item.value)),
            SelectionGesture::ClearAll => self.clear_all(),
            SelectionGesture::ToggleAll => {
                if self.header_state(loaded) == SelectAllState::Checked {
                    self.clear_all();
                } else {
                    self.select_all(loaded.iter().map(|item| item.value));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(ids: &[ItemId]) -> Vec<Item> {
        ids.iter().map(|&id| Item::new(id, id as f64)).collect()
    }

    #[test]
    fn test_toggle() {
        let mut set = SelectionSet::new();
        assert!(set.toggle(3));
        assert!(set.toggle(1));
        assert_eq!(set.ids(), &[3, 1]);
        assert!(!set.toggle(3));
        assert_eq!(set.ids(), &[1]);
        assert!(!set.contains(3));
    }

    #[test]
    fn test_select_all_then_clear() {
        let items = loaded(&[1, 2, 3]);
        let mut set = SelectionSet::from_snapshot([7]);
        set.apply(SelectionGesture::SelectAll, &items);
        assert_eq!(set.snapshot(), vec![1, 2, 3]);
        set.apply(SelectionGesture::ClearAll, &items);
        assert!(set.is_empty());
    }

    #[test]
    fn test_from_snapshot_dedupes() {
        let set = SelectionSet::from_snapshot([2, 2, 5]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_header_state() {
        let items = loaded(&[1, 2]);
        let mut set = SelectionSet::from_snapshot([99]);
        assert_eq!(set.header_state(&items), SelectAllState::Unchecked);
        set.toggle(1);
        assert_eq!(set.header_state(&items), SelectAllState::Indeterminate);
        set.toggle(2);
        assert_eq!(set.header_state(&items), SelectAllState::Checked);
        assert_eq!(set.header_state(&[]), SelectAllState::Unchecked);
    }

    #[test]
    fn test_toggle_all_flips_between_all_and_none() {
        let items = loaded(&[1, 2]);
        let mut set = SelectionSet::from_snapshot([1, 2, 42]);
        set.apply(SelectionGesture::ToggleAll, &items);
        assert!(set.is_empty());
        set.apply(SelectionGesture::ToggleAll, &items);
        assert_eq!(set.snapshot(), vec![1, 2]);
    }
}
