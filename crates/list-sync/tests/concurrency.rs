//! Out-of-order completion tests
//!
//! Drives `ListSession` against a gateway whose page fetches only finish
//! when the test releases them, so responses can be made to arrive late.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use list_sync::{
    DragMove, Filter, ListConfig, ListSession, MemoryGateway, Page, PersistedSnapshot,
    RemoteListGateway, Result, SelectionGesture, StatePatch,
};

/// Wraps `MemoryGateway`; each page fetch waits for the next queued gate
struct GatedGateway {
    inner: MemoryGateway,
    gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
}

impl GatedGateway {
    fn new(inner: MemoryGateway) -> Self {
        Self {
            inner,
            gates: RefCell::new(VecDeque::new()),
        }
    }

    fn gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().push_back(rx);
        tx
    }
}

#[async_trait(?Send)]
impl RemoteListGateway for GatedGateway {
    async fn fetch_items(&self, filter: &Filter, offset: usize) -> Result<Page> {
        let gate = self.gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.fetch_items(filter, offset).await
    }

    async fn fetch_state(&self) -> Result<Option<PersistedSnapshot>> {
        self.inner.fetch_state().await
    }

    async fn persist_state(&self, patch: &StatePatch) -> Result<()> {
        self.inner.persist_state(patch).await
    }
}

fn values(session: &ListSession<GatedGateway>) -> Vec<u64> {
    session.read(|engine| engine.items().iter().map(|item| item.value).collect())
}

async fn started(count: u64) -> ListSession<GatedGateway> {
    let gateway = Rc::new(GatedGateway::new(MemoryGateway::sequential(count, 20)));
    let session = ListSession::new(ListConfig::default(), gateway);
    session.start().await;
    session
}

#[tokio::test]
async fn late_page_from_previous_filter_is_dropped() {
    let session = started(100).await;
    assert_eq!(values(&session).len(), 20);

    let old_gate = session.gateway().gate();
    let new_gate = session.gateway().gate();

    let scroll = session.scroll_near_bottom();
    let filter = session.set_filter(Filter::search("7"));
    let release = async {
        let _ = new_gate.send(());
        tokio::task::yield_now().await;
        let _ = old_gate.send(());
    };
    tokio::join!(scroll, filter, release);

    let loaded = values(&session);
    assert!(!loaded.is_empty());
    assert!(loaded.iter().all(|value| value.to_string().contains('7')));
    assert_eq!(session.read(|engine| engine.epoch()), 1);
    assert!(!session.read(|engine| engine.is_fetching()));
}

#[tokio::test]
async fn scroll_storm_issues_one_fetch() {
    let session = started(100).await;
    let gate = session.gateway().gate();

    let first = session.scroll_near_bottom();
    let second = session.scroll_near_bottom();
    let third = session.scroll_near_bottom();
    let release = async {
        tokio::task::yield_now().await;
        let _ = gate.send(());
    };
    tokio::join!(first, second, third, release);

    assert_eq!(values(&session), (1..=40).collect::<Vec<_>>());
    assert_eq!(session.read(|engine| engine.offset()), 20);
    assert_eq!(session.gateway().inner.fetch_log().len(), 2);
}

#[tokio::test]
async fn local_edits_proceed_while_page_is_pending() {
    let session = started(100).await;
    let gate = session.gateway().gate();

    let scroll = session.scroll_near_bottom();
    let edits = async {
        session.select(SelectionGesture::Toggle(1)).await;
        session.reorder(DragMove::new(0, Some(1))).await;
        // both applied before the page is released
        assert!(session.read(|engine| engine.is_fetching()));
        let _ = gate.send(());
    };
    tokio::join!(scroll, edits);

    let loaded = values(&session);
    assert_eq!(loaded.len(), 40);
    assert_eq!(&loaded[..2], &[2, 1]);
    assert_eq!(session.gateway().inner.persisted().len(), 2);
    assert!(session.read(|engine| engine.selection().contains(1)));
}
