//! List Sync Core
//!
//! Keeps an incrementally fetched remote list, a locally ordered view, a
//! selection set and manual ordering consistent while pages are in flight,
//! filters reset the list and rows are dragged around.
//!
//! Layers:
//! - domain: wire models shared with the remote store of record
//! - reorder / selection / pagination / filter: the building blocks
//! - engine: the state machine that composes them and emits `Effects`
//! - gateway / session: async I/O boundary and the driver that runs effects
//!
//! # Examples
//!
//! ```rust
//! use list_sync::{DragMove, Item, ListConfig, Page, SyncEngine};
//!
//! let mut engine = SyncEngine::new(ListConfig::default());
//! let request = engine.on_scroll_near_bottom().fetch.expect("first page");
//! engine.on_page_result(
//!     request.ticket,
//!     Ok(Page::new(vec![Item::new(1, 1.0), Item::new(2, 2.0)], false)),
//! );
//!
//! let effects = engine.on_reorder(DragMove::new(0, Some(1)));
//! assert!(effects.persist.is_some());
//! assert_eq!(engine.items()[0].value, 2);
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod pagination;
pub mod reorder;
pub mod selection;
pub mod session;

pub use config::ListConfig;
pub use domain::{Filter, Item, ItemId, Page, PersistedSnapshot, StatePatch};
pub use engine::{Effects, ListView, PageOutcome, Phase, Row, SyncEngine};
pub use error::{Result, SyncError};
pub use filter::FilterController;
pub use gateway::{MemoryGateway, RemoteListGateway};
pub use pagination::{is_near_bottom, FetchRequest, FetchTicket, PaginationCoordinator};
pub use reorder::{apply_move, DragMove};
pub use selection::{SelectAllState, SelectionGesture, SelectionSet};
pub use session::ListSession;
