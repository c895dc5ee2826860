//! UI Components
//!
//! Leptos components for the item list.

mod filter_bar;
mod item_table;

pub use filter_bar::FilterBar;
pub use item_table::ItemTable;
