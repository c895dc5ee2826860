//! Item Entity
//!
//! One row of the remote list: a stable identity plus a manual sort key.

use serde::{Deserialize, Serialize};

/// Unique, stable identity of an item across fetches
pub type ItemId = u64;

/// A list entry
///
/// Display order is derived from ascending `order`, never from the
/// position in a `Vec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Identity (rendered as the value column)
    pub value: ItemId,
    /// Manual sort key; need not be contiguous
    pub order: f64,
}

impl Item {
    pub fn new(value: ItemId, order: f64) -> Self {
        Self { value, order }
    }
}

/// True when `order` strictly increases along the slice
pub fn is_strictly_ordered(items: &[Item]) -> bool {
    items.windows(2).all(|pair| pair[0].order < pair[1].order)
}
