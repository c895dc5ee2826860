//! Pagination Coordinator
//!
//! Tracks the fetch offset, the continuation flag and the single
//! outstanding page request. Every request carries a ticket stamped with
//! the filter epoch it was issued under; results are only accepted for the
//! ticket that is currently outstanding.
//!
//! `offset` is the start of the most recently requested page. The first
//! request after a reset goes out at the current offset; every later one
//! advances it by one page first.

use tracing::debug;

use crate::domain::Filter;

/// Identifies one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    /// Filter epoch at issue time
    pub epoch: u64,
    /// Issue sequence, unique per coordinator
    pub seq: u64,
}

/// A page fetch the gateway should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub filter: Filter,
    pub offset: usize,
}

/// The outstanding request and the cursor to restore if it fails
#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: FetchTicket,
    previous: Cursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    offset: usize,
    /// Whether a page has been requested at `offset` yet
    started: bool,
}

#[derive(Debug, Clone)]
pub struct PaginationCoordinator {
    page_size: usize,
    cursor: Cursor,
    has_more: bool,
    in_flight: Option<InFlight>,
    next_seq: u64,
}

impl PaginationCoordinator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            cursor: Cursor {
                offset: 0,
                started: false,
            },
            has_more: true,
            in_flight: None,
            next_seq: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight.map(|pending| pending.ticket)
    }

    /// Issue the next page request, unless one is outstanding or the list
    /// is exhausted
    pub fn request_next_page(&mut self, epoch: u64, filter: &Filter) -> Option<FetchRequest> {
        if self.in_flight.is_some() || !self.has_more {
            debug!(
                in_flight = self.in_flight.is_some(),
                has_more = self.has_more,
                "next page suppressed"
            );
            return None;
        }
        let ticket = FetchTicket {
            epoch,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let previous = self.cursor;
        if self.cursor.started {
            self.cursor.offset += self.page_size;
        }
        self.cursor.started = true;
        self.in_flight = Some(InFlight { ticket, previous });

        let offset = self.cursor.offset;
        debug!(epoch, offset, seq = ticket.seq, "page requested");
        Some(FetchRequest {
            ticket,
            filter: filter.clone(),
            offset,
        })
    }

    /// Whether `ticket` is the request currently awaited
    pub fn is_outstanding(&self, ticket: FetchTicket) -> bool {
        self.in_flight.map(|pending| pending.ticket) == Some(ticket)
    }

    /// Close the outstanding request after a successful page
    pub fn complete(&mut self, ticket: FetchTicket, has_more: bool) -> bool {
        if !self.is_outstanding(ticket) {
            return false;
        }
        self.in_flight = None;
        self.has_more = has_more;
        true
    }

    /// Close the outstanding request after a failure and give its page back
    pub fn fail(&mut self, ticket: FetchTicket) -> bool {
        match self.in_flight {
            Some(pending) if pending.ticket == ticket => {
                self.cursor = pending.previous;
                self.in_flight = None;
                true
            }
            _ => false,
        }
    }

    /// Forget everything about the previous filter
    ///
    /// Any outstanding ticket is abandoned; its result will no longer match.
    pub fn reset(&mut self) {
        self.cursor = Cursor {
            offset: 0,
            started: false,
        };
        self.has_more = true;
        self.in_flight = None;
    }

    /// Continue paging after `loaded` items restored from a snapshot
    ///
    /// The next request goes out at `loaded`.
    pub fn resume_at(&mut self, loaded: usize) {
        self.cursor = Cursor {
            offset: loaded,
            started: false,
        };
        self.has_more = true;
        self.in_flight = None;
    }
}

/// Scroll position test: `scroll_top + viewport_height >= document_height - threshold`
pub fn is_near_bottom(
    scroll_top: f64,
    viewport_height: f64,
    document_height: f64,
    threshold: f64,
) -> bool {
    scroll_top + viewport_height >= document_height - threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_advance_by_page_size() {
        let mut pages = PaginationCoordinator::new(20);
        let first = pages.request_next_page(0, &Filter::default()).unwrap();
        assert_eq!(first.offset, 0);
        assert!(pages.complete(first.ticket, true));

        let second = pages.request_next_page(0, &Filter::default()).unwrap();
        assert_eq!(second.offset, 20);
        assert_eq!(pages.offset(), 20);
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut pages = PaginationCoordinator::new(20);
        assert!(pages.request_next_page(0, &Filter::default()).is_some());
        assert!(pages.request_next_page(0, &Filter::default()).is_none());
        assert!(pages.request_next_page(0, &Filter::default()).is_none());
        assert_eq!(pages.offset(), 0);
    }

    #[test]
    fn test_exhausted_list_stops() {
        let mut pages = PaginationCoordinator::new(20);
        let request = pages.request_next_page(0, &Filter::default()).unwrap();
        pages.complete(request.ticket, false);
        assert!(pages.request_next_page(0, &Filter::default()).is_none());
    }

    #[test]
    fn test_failure_returns_offset() {
        let mut pages = PaginationCoordinator::new(20);
        let request = pages.request_next_page(0, &Filter::default()).unwrap();
        assert!(pages.fail(request.ticket));
        assert_eq!(pages.offset(), 0);
        assert!(!pages.is_fetching());
        assert_eq!(pages.request_next_page(0, &Filter::default()).unwrap().offset, 0);
    }

    #[test]
    fn test_failure_after_first_page_retries_same_offset() {
        let mut pages = PaginationCoordinator::new(20);
        let first = pages.request_next_page(0, &Filter::default()).unwrap();
        pages.complete(first.ticket, true);
        let second = pages.request_next_page(0, &Filter::default()).unwrap();
        assert!(pages.fail(second.ticket));
        assert_eq!(pages.offset(), 0);

        let retry = pages.request_next_page(0, &Filter::default()).unwrap();
        assert_eq!(retry.offset, 20);
        assert_eq!(pages.offset(), 20);
    }

    #[test]
    fn test_reset_returns_offset_to_zero() {
        let mut pages = PaginationCoordinator::new(20);
        for _ in 0..3 {
            let request = pages.request_next_page(0, &Filter::default()).unwrap();
            pages.complete(request.ticket, true);
        }
        assert_eq!(pages.offset(), 40);

        pages.reset();
        assert_eq!(pages.offset(), 0);
        let first = pages.request_next_page(1, &Filter::search("x")).unwrap();
        assert_eq!(first.offset, 0);
        assert_eq!(pages.offset(), 0);
    }

    #[test]
    fn test_resume_requests_after_restored_items() {
        let mut pages = PaginationCoordinator::new(20);
        pages.resume_at(7);
        assert_eq!(pages.request_next_page(0, &Filter::default()).unwrap().offset, 7);
    }

    #[test]
    fn test_reset_abandons_ticket() {
        let mut pages = PaginationCoordinator::new(20);
        let stale = pages.request_next_page(0, &Filter::default()).unwrap();
        pages.reset();
        let fresh = pages.request_next_page(1, &Filter::search("a")).unwrap();

        assert!(!pages.complete(stale.ticket, false));
        assert!(pages.is_outstanding(fresh.ticket));
        assert_eq!(fresh.offset, 0);
    }

    #[test]
    fn test_near_bottom() {
        assert!(is_near_bottom(700.0, 300.0, 1000.0, 0.0));
        assert!(is_near_bottom(699.0, 300.0, 1000.0, 2.0));
        assert!(!is_near_bottom(600.0, 300.0, 1000.0, 2.0));
    }
}
