//! Filter
//!
//! Either a free-text search or a numeric value range. Only one is active
//! at a time.

use serde::{Deserialize, Serialize};

use super::item::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Filter {
    /// Free-text search (empty string = everything)
    Search { text: String },
    /// Inclusive value range; `None` bounds are open
    Range {
        min: Option<ItemId>,
        max: Option<ItemId>,
    },
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Search { text: String::new() }
    }
}

impl Filter {
    pub fn search(text: impl Into<String>) -> Self {
        Filter::Search { text: text.into() }
    }

    pub fn range(min: Option<ItemId>, max: Option<ItemId>) -> Self {
        Filter::Range { min, max }
    }

    /// True when the filter lets everything through
    pub fn is_unfiltered(&self) -> bool {
        match self {
            Filter::Search { text } => text.is_empty(),
            Filter::Range { min, max } => min.is_none() && max.is_none(),
        }
    }

    /// Whether `value` passes the filter
    ///
    /// The remote store does the authoritative filtering; this is what the
    /// in-memory gateway uses.
    pub fn matches(&self, value: ItemId) -> bool {
        match self {
            Filter::Search { text } => text.is_empty() || value.to_string().contains(text.as_str()),
            Filter::Range { min, max } => {
                min.map_or(true, |lo| value >= lo) && max.map_or(true, |hi| value <= hi)
            }
        }
    }

    /// Query parameters for `GET /items`
    pub fn query_params(&self, offset: usize) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        match self {
            Filter::Search { text } => {
                if !text.is_empty() {
                    params.push(("search", text.clone()));
                }
            }
            Filter::Range { min, max } => {
                if let Some(lo) = min {
                    params.push(("min", lo.to_string()));
                }
                if let Some(hi) = max {
                    params.push(("max", hi.to_string()));
                }
            }
        }
        params.push(("offset", offset.to_string()));
        params
    }
}
