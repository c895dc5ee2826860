//! List Session
//!
//! Async driver around `SyncEngine`: runs the effects a gesture produces
//! against a `RemoteListGateway` and feeds the results back.
//!
//! The engine is borrowed only between awaits, so gestures keep flowing
//! while fetches and persistence calls are outstanding. Persistence is
//! fire-and-forget: nothing waits on it before the next local mutation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ListConfig;
use crate::domain::{Filter, StatePatch};
use crate::engine::{Effects, ListView, PageOutcome, SyncEngine};
use crate::gateway::RemoteListGateway;
use crate::pagination::FetchRequest;
use crate::reorder::DragMove;
use crate::selection::SelectionGesture;

type Observer = Rc<dyn Fn(ListView)>;

/// Shared handle to one list session (cheap to clone)
pub struct ListSession<G> {
    engine: Rc<RefCell<SyncEngine>>,
    gateway: Rc<G>,
    observer: Option<Observer>,
}

impl<G> Clone for ListSession<G> {
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
            gateway: Rc::clone(&self.gateway),
            observer: self.observer.clone(),
        }
    }
}

impl<G: RemoteListGateway> ListSession<G> {
    pub fn new(config: ListConfig, gateway: Rc<G>) -> Self {
        Self {
            engine: Rc::new(RefCell::new(SyncEngine::new(config))),
            gateway,
            observer: None,
        }
    }

    /// Receive a fresh projection after every engine change
    pub fn with_observer(mut self, observer: impl Fn(ListView) + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn view(&self) -> ListView {
        self.engine.borrow().view()
    }

    /// Inspect the engine without mutating it
    pub fn read<R>(&self, f: impl FnOnce(&SyncEngine) -> R) -> R {
        f(&*self.engine.borrow())
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut SyncEngine) -> R) -> R {
        let result = {
            let mut engine = self.engine.borrow_mut();
            f(&mut *engine)
        };
        if let Some(observer) = &self.observer {
            observer(self.view());
        }
        result
    }

    // ========================
    // Gestures
    // ========================

    /// Hydrate from the persisted snapshot on first mount
    pub async fn start(&self) {
        if !self.mutate(SyncEngine::begin_hydration) {
            return;
        }
        let snapshot = self.gateway.fetch_state().await;
        let effects = self.mutate(|engine| engine.hydrate(snapshot));
        self.run(effects).await;
    }

    pub async fn scroll_near_bottom(&self) {
        let effects = self.mutate(SyncEngine::on_scroll_near_bottom);
        self.run(effects).await;
    }

    pub async fn set_filter(&self, filter: Filter) {
        let effects = self.mutate(|engine| engine.on_filter_change(filter));
        self.run(effects).await;
    }

    pub async fn select(&self, gesture: SelectionGesture) {
        let effects = self.mutate(|engine| engine.on_selection_gesture(gesture));
        self.run(effects).await;
    }

    pub async fn reorder(&self, mv: DragMove) {
        let effects = self.mutate(|engine| engine.on_reorder(mv));
        self.run(effects).await;
    }

    // ========================
    // Effect execution
    // ========================

    async fn run(&self, effects: Effects) {
        let Effects { fetch, persist } = effects;
        let persist = async {
            if let Some(patch) = persist {
                self.persist(patch).await;
            }
        };
        let fetch = async {
            if let Some(request) = fetch {
                self.fetch_page(request).await;
            }
        };
        futures::join!(persist, fetch);
    }

    async fn fetch_page(&self, request: FetchRequest) -> PageOutcome {
        let result = self.gateway.fetch_items(&request.filter, request.offset).await;
        self.mutate(|engine| engine.on_page_result(request.ticket, result))
    }

    async fn persist(&self, patch: StatePatch) {
        let result = self.gateway.persist_state(&patch).await;
        self.mutate(|engine| engine.on_persist_result(result));
    }
}
