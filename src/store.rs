//! Table State Store
//!
//! Reactive projection of the list engine, plus the shared session handle.
//! Components read from the store; only the session writes to it.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_sync::{Filter, ListSession, ListView, Row, SelectAllState};
use reactive_stores::Store;

use crate::gateway::HttpGateway;

/// What the table renders, with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TableState {
    /// Loaded rows in display order
    pub rows: Vec<Row>,
    /// A hydration or page fetch is outstanding
    pub loading: bool,
    pub has_more: bool,
    /// Header checkbox
    pub select_all: SelectAllState,
    /// Active filter (restored on hydration)
    pub filter: Filter,
    /// Last fetch/persist failure, if any
    pub error: Option<String>,
}

/// Type alias for the store
pub type TableStore = Store<TableState>;

pub type Session = ListSession<HttpGateway>;

/// Session handle shared through context; the session itself is `!Send`
pub type SessionHandle = StoredValue<Session, LocalStorage>;

/// Get the table store from context
pub fn use_table_store() -> TableStore {
    expect_context::<TableStore>()
}

/// Get the session handle from context
pub fn use_session() -> SessionHandle {
    expect_context::<SessionHandle>()
}

/// Copy a fresh engine projection into the store
pub fn store_apply_view(store: &TableStore, view: ListView) {
    *store.rows().write() = view.rows;
    *store.loading().write() = view.loading;
    *store.has_more().write() = view.has_more;
    *store.select_all().write() = view.select_all;
    *store.filter().write() = view.filter;
    *store.error().write() = view.error;
}

/// Run a session gesture on the local executor
pub fn dispatch<F, Fut>(session: SessionHandle, gesture: F)
where
    F: FnOnce(Session) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    spawn_local(gesture(session.get_value()));
}
