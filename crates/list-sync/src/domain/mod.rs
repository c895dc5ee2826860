//! Domain Layer
//!
//! Wire-level models shared with the remote store of record.
//! This layer has NO I/O (serde only).

mod filter;
mod item;
mod state;

pub use filter::Filter;
pub use item::{is_strictly_ordered, Item, ItemId};
pub use state::{Page, PersistedSnapshot, StatePatch};
