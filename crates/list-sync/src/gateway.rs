//! Remote List Gateway
//!
//! The async boundary to the store of record. Implementations live at the
//! edge (HTTP in the frontend, in-memory for tests and offline demos).
//!
//! Futures are not required to be `Send`: the engine runs on a single
//! event loop and browser fetch futures are `!Send`.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use crate::domain::{Filter, Item, ItemId, Page, PersistedSnapshot, StatePatch};
use crate::error::{Result, SyncError};

#[async_trait(?Send)]
pub trait RemoteListGateway {
    /// Fetch one page of items matching `filter`, starting at `offset`
    async fn fetch_items(&self, filter: &Filter, offset: usize) -> Result<Page>;

    /// Fetch the persisted snapshot, if one was ever written
    async fn fetch_state(&self) -> Result<Option<PersistedSnapshot>>;

    /// Persist the populated fields of `patch`
    async fn persist_state(&self, patch: &StatePatch) -> Result<()>;
}

/// In-memory store of record
///
/// Filters with `Filter::matches`, pages by `page_size` and keeps every
/// persisted patch for inspection.
#[derive(Debug)]
pub struct MemoryGateway {
    page_size: usize,
    catalog: Vec<Item>,
    state: RefCell<Option<PersistedSnapshot>>,
    persisted: RefCell<Vec<StatePatch>>,
    fetches: RefCell<Vec<(Filter, usize)>>,
    fail_fetch: Cell<bool>,
    fail_persist: Cell<bool>,
}

impl MemoryGateway {
    pub fn new(catalog: Vec<Item>, page_size: usize) -> Self {
        Self {
            page_size,
            catalog,
            state: RefCell::new(None),
            persisted: RefCell::new(Vec::new()),
            fetches: RefCell::new(Vec::new()),
            fail_fetch: Cell::new(false),
            fail_persist: Cell::new(false),
        }
    }

    /// Catalog of values `1..=count`, each ordered by its value
    pub fn sequential(count: ItemId, page_size: usize) -> Self {
        let catalog = (1..=count).map(|value| Item::new(value, value as f64)).collect();
        Self::new(catalog, page_size)
    }

    pub fn with_snapshot(self, snapshot: PersistedSnapshot) -> Self {
        *self.state.borrow_mut() = Some(snapshot);
        self
    }

    pub fn set_fetch_failure(&self, fail: bool) {
        self.fail_fetch.set(fail);
    }

    pub fn set_persist_failure(&self, fail: bool) {
        self.fail_persist.set(fail);
    }

    /// Every patch accepted so far, oldest first
    pub fn persisted(&self) -> Vec<StatePatch> {
        self.persisted.borrow().clone()
    }

    pub fn snapshot(&self) -> Option<PersistedSnapshot> {
        self.state.borrow().clone()
    }

    /// `(filter, offset)` of every page fetch, oldest first
    pub fn fetch_log(&self) -> Vec<(Filter, usize)> {
        self.fetches.borrow().clone()
    }
}

#[async_trait(?Send)]
impl RemoteListGateway for MemoryGateway {
    async fn fetch_items(&self, filter: &Filter, offset: usize) -> Result<Page> {
        self.fetches.borrow_mut().push((filter.clone(), offset));
        if self.fail_fetch.get() {
            return Err(SyncError::Fetch("memory gateway offline".to_string()));
        }
        let matching: Vec<&Item> = self
            .catalog
            .iter()
            .filter(|item| filter.matches(item.value))
            .collect();
        let items = matching
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|item| (*item).clone())
            .collect();
        Ok(Page::new(items, offset + self.page_size < matching.len()))
    }

    async fn fetch_state(&self) -> Result<Option<PersistedSnapshot>> {
        if self.fail_fetch.get() {
            return Err(SyncError::Fetch("memory gateway offline".to_string()));
        }
        Ok(self.state.borrow().clone())
    }

    async fn persist_state(&self, patch: &StatePatch) -> Result<()> {
        if self.fail_persist.get() {
            return Err(SyncError::Persist("memory gateway rejected write".to_string()));
        }
        patch.apply_to(self.state.borrow_mut().get_or_insert_with(Default::default));
        self.persisted.borrow_mut().push(patch.clone());
        Ok(())
    }
}
