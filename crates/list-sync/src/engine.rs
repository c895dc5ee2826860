//! Synchronization Engine
//!
//! Owns the canonical local list and composes pagination, filtering,
//! selection and reordering. The engine performs no I/O: every gesture
//! returns the `Effects` the caller must run (at most one page fetch and at
//! most one persistence patch), and results are fed back through
//! `hydrate`, `on_page_result` and `on_persist_result`.
//!
//! Phases:
//!
//! ```text
//! Idle -> Hydrating -> Ready <-> FetchingPage
//!                      Ready -> Filtering -> Ready
//! ```
//!
//! `Filtering` lasts from a filter change until the first page under the
//! new filter resolves. A filter change while hydrating also lands there.

use tracing::{debug, error, info, warn};

use crate::config::ListConfig;
use crate::domain::{Filter, Item, ItemId, Page, PersistedSnapshot, StatePatch};
use crate::error::{Result, SyncError};
use crate::filter::FilterController;
use crate::pagination::{FetchRequest, FetchTicket, PaginationCoordinator};
use crate::reorder::{apply_move, DragMove};
use crate::selection::{SelectAllState, SelectionGesture, SelectionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing loaded, hydration not started
    Idle,
    /// Waiting for the persisted snapshot
    Hydrating,
    /// Loaded, no page outstanding
    Ready,
    /// List cleared for a new filter, its first page outstanding
    Filtering,
    /// One page request outstanding
    FetchingPage,
}

/// Side effects requested by a gesture
#[must_use]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    pub fetch: Option<FetchRequest>,
    pub persist: Option<StatePatch>,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    fn fetch(fetch: Option<FetchRequest>) -> Self {
        Self { fetch, persist: None }
    }

    fn persist(patch: StatePatch) -> Self {
        Self {
            fetch: None,
            persist: Some(patch),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fetch.is_none() && self.persist.is_none()
    }
}

/// What happened to a page result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Applied { appended: usize },
    /// Issued under an older filter or superseded; dropped
    Stale,
    Failed,
}

/// A rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub value: ItemId,
    pub order: f64,
    pub selected: bool,
}

/// Read-only projection handed to the presentation layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListView {
    pub rows: Vec<Row>,
    pub loading: bool,
    pub has_more: bool,
    pub select_all: SelectAllState,
    pub filter: Filter,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct SyncEngine {
    config: ListConfig,
    phase: Phase,
    items: Vec<Item>,
    selection: SelectionSet,
    filter: FilterController,
    pagination: PaginationCoordinator,
    /// Filter epoch at which hydration started
    hydrating_epoch: Option<u64>,
    last_error: Option<SyncError>,
}

impl SyncEngine {
    pub fn new(config: ListConfig) -> Self {
        let pagination = PaginationCoordinator::new(config.page_size);
        Self {
            config,
            phase: Phase::Idle,
            items: Vec::new(),
            selection: SelectionSet::new(),
            filter: FilterController::new(),
            pagination,
            hydrating_epoch: None,
            last_error: None,
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn filter(&self) -> &Filter {
        self.filter.current()
    }

    pub fn epoch(&self) -> u64 {
        self.filter.epoch()
    }

    pub fn offset(&self) -> usize {
        self.pagination.offset()
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    pub fn is_fetching(&self) -> bool {
        self.pagination.is_fetching()
    }

    pub fn last_error(&self) -> Option<&SyncError> {
        self.last_error.as_ref()
    }

    pub fn view(&self) -> ListView {
        ListView {
            rows: self
                .items
                .iter()
                .map(|item| Row {
                    value: item.value,
                    order: item.order,
                    selected: self.selection.contains(item.value),
                })
                .collect(),
            loading: self.is_fetching() || self.phase == Phase::Hydrating,
            has_more: self.has_more(),
            select_all: self.selection.header_state(&self.items),
            filter: self.filter.current().clone(),
            error: self.last_error.as_ref().map(ToString::to_string),
        }
    }

    fn transition(&mut self, next: Phase) {
        if self.phase != next {
            debug!(from = ?self.phase, to = ?next, "phase");
            self.phase = next;
        }
    }

    // ========================
    // Hydration
    // ========================

    /// Start hydration; only on a fresh engine with nothing pending
    pub fn begin_hydration(&mut self) -> bool {
        if self.phase != Phase::Idle || !self.items.is_empty() || self.is_fetching() {
            return false;
        }
        self.hydrating_epoch = Some(self.filter.epoch());
        self.transition(Phase::Hydrating);
        true
    }

    /// Apply the persisted snapshot (or its absence)
    ///
    /// A failed lookup counts as "no snapshot". If the list ends up empty
    /// the first page is requested right away.
    pub fn hydrate(&mut self, result: Result<Option<PersistedSnapshot>>) -> Effects {
        let Some(epoch) = self.hydrating_epoch.take() else {
            warn!("snapshot arrived without a pending hydration");
            return Effects::none();
        };

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!(%err, "hydration failed, starting empty");
                self.last_error = Some(err);
                None
            }
        };

        if !self.filter.is_current(epoch) {
            // a newer filter already owns the list; only the selection carries over
            if let Some(snapshot) = snapshot {
                self.selection = SelectionSet::from_snapshot(snapshot.selected_items);
            }
            info!(epoch = self.filter.epoch(), "hydration superseded by filter change");
            return Effects::none();
        }

        match snapshot {
            Some(snapshot) => {
                let mut items = snapshot.sorted_items;
                items.sort_by(|a, b| a.order.total_cmp(&b.order));
                info!(
                    count = items.len(),
                    selected = snapshot.selected_items.len(),
                    "hydrated from snapshot"
                );
                self.items = items;
                self.selection = SelectionSet::from_snapshot(snapshot.selected_items);
                self.filter.restore(snapshot.filter);
            }
            None => info!("no persisted snapshot"),
        }

        self.pagination.resume_at(self.items.len());
        self.transition(Phase::Ready);
        if self.items.is_empty() {
            Effects::fetch(self.request_next_page())
        } else {
            Effects::none()
        }
    }

    // ========================
    // Pagination
    // ========================

    fn request_next_page(&mut self) -> Option<FetchRequest> {
        if self.phase == Phase::Hydrating {
            return None;
        }
        let request = self
            .pagination
            .request_next_page(self.filter.epoch(), self.filter.current())?;
        self.transition(Phase::FetchingPage);
        Some(request)
    }

    pub fn on_scroll_near_bottom(&mut self) -> Effects {
        Effects::fetch(self.request_next_page())
    }

    /// Merge a page result; stale results never touch the list
    pub fn on_page_result(&mut self, ticket: FetchTicket, result: Result<Page>) -> PageOutcome {
        if !self.filter.is_current(ticket.epoch) || !self.pagination.is_outstanding(ticket) {
            warn!(
                epoch = ticket.epoch,
                current_epoch = self.filter.epoch(),
                seq = ticket.seq,
                "dropping stale page"
            );
            return PageOutcome::Stale;
        }

        let outcome = match result {
            Ok(page) => {
                let appended = page.items.len();
                self.pagination.complete(ticket, page.has_more);
                self.items.extend(page.items);
                if matches!(self.last_error, Some(SyncError::Fetch(_))) {
                    self.last_error = None;
                }
                debug!(
                    appended,
                    total = self.items.len(),
                    has_more = self.pagination.has_more(),
                    "page applied"
                );
                PageOutcome::Applied { appended }
            }
            Err(err) => {
                self.pagination.fail(ticket);
                error!(%err, offset = self.pagination.offset(), "page fetch failed");
                self.last_error = Some(err);
                PageOutcome::Failed
            }
        };
        self.transition(Phase::Ready);
        outcome
    }

    // ========================
    // Filtering
    // ========================

    /// Switch filters: clear the list, open a new epoch and fetch page 0
    pub fn on_filter_change(&mut self, filter: Filter) -> Effects {
        let Some(epoch) = self.filter.set(filter) else {
            return Effects::none();
        };
        self.transition(Phase::Filtering);
        self.items.clear();
        self.pagination.reset();

        let fetch = self.pagination.request_next_page(epoch, self.filter.current());
        debug!(epoch, offset = self.pagination.offset(), "filter changed");
        Effects {
            fetch,
            persist: Some(StatePatch::filter(self.filter.current().clone())),
        }
    }

    // ========================
    // Selection & Ordering
    // ========================

    pub fn on_selection_gesture(&mut self, gesture: SelectionGesture) -> Effects {
        self.selection.apply(gesture, &self.items);
        debug!(?gesture, selected = self.selection.len(), "selection changed");
        Effects::persist(StatePatch::selection(self.selection.snapshot()))
    }

    pub fn on_reorder(&mut self, mv: DragMove) -> Effects {
        match apply_move(&mut self.items, mv, self.config.reorder_step) {
            Ok(true) => {
                debug!(source = mv.source, destination = ?mv.destination, "reordered");
                Effects::persist(StatePatch::ordering(self.items.clone()))
            }
            Ok(false) => Effects::none(),
            Err(err) => {
                warn!(%err, "drag move rejected");
                Effects::none()
            }
        }
    }

    /// Record the outcome of a persistence call; local state is never rolled back
    pub fn on_persist_result(&mut self, result: Result<()>) {
        if let Err(err) = result {
            error!(%err, "persist failed, keeping local state");
            self.last_error = Some(err);
        }
    }
}
