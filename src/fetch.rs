//! Request sequencing for resources fed by background fetches.
//!
//! Every fetch gets a [`Ticket`] from one process-wide counter. A slot only
//! accepts the response for the last ticket it issued, so a response that
//! arrives after the user paged, re-sorted or left the screen is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;

use crate::pagination::{ItemsResponse, Pagination, PaginationOptions, Paginator};
use crate::resource::Resource;

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    fn issue() -> Self {
        Ticket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }
}

/// Latest ticket issued for one logical resource.
#[derive(Debug, Default)]
pub struct RequestSeq {
    latest: Option<Ticket>,
}

impl RequestSeq {
    pub fn issue(&mut self) -> Ticket {
        let t = Ticket::issue();
        self.latest = Some(t);
        t
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest == Some(ticket)
    }
}

/// A single-entity resource and its request sequence.
#[derive(Debug, Default)]
pub struct Loadable<T> {
    resource: Resource<T>,
    seq: RequestSeq,
}

impl<T> Loadable<T> {
    pub fn new() -> Self {
        Self {
            resource: Resource::default(),
            seq: RequestSeq::default(),
        }
    }

    pub fn resource(&self) -> &Resource<T> {
        &self.resource
    }

    /// Put the resource in `loading` and hand out the ticket for the fetch.
    pub fn begin(&mut self) -> Ticket {
        self.resource = Resource::loading();
        self.seq.issue()
    }

    /// Apply a fetch outcome. Returns `false` when the ticket is stale.
    pub fn settle(&mut self, ticket: Ticket, result: Result<Option<T>>) -> bool {
        if !self.seq.is_current(ticket) {
            log::debug!("[fetch] dropping stale response {ticket:?}");
            return false;
        }
        if let Err(e) = &result {
            log::warn!("[fetch] request failed: {e:#}");
        }
        self.resource = Resource::from_result(result);
        true
    }
}

/// A paginated collection, its paginator and its request sequence.
#[derive(Debug)]
pub struct PagedLoadable<T> {
    items: Resource<Vec<T>>,
    paginator: Paginator,
    seq: RequestSeq,
}

impl<T> PagedLoadable<T> {
    pub fn new(limit: u32) -> Self {
        Self {
            items: Resource::default(),
            paginator: Paginator::new(limit),
            seq: RequestSeq::default(),
        }
    }

    pub fn items(&self) -> &Resource<Vec<T>> {
        &self.items
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.paginator.pagination()
    }

    /// Fetch the page the paginator currently points at.
    pub fn begin(&mut self) -> (Ticket, PaginationOptions) {
        self.items = Resource::loading();
        (self.seq.issue(), self.paginator.options())
    }

    /// Start over from the first page (filter or sort changed).
    pub fn restart(&mut self) -> (Ticket, PaginationOptions) {
        self.paginator.reset();
        self.begin()
    }

    pub fn next_page(&mut self) -> Option<(Ticket, PaginationOptions)> {
        self.paginator.next()?;
        Some(self.begin())
    }

    pub fn previous_page(&mut self) -> Option<(Ticket, PaginationOptions)> {
        self.paginator.previous()?;
        Some(self.begin())
    }

    /// Apply a page response. An empty first page is reported as not-found.
    pub fn settle(&mut self, ticket: Ticket, result: Result<ItemsResponse<T>>) -> bool {
        if !self.seq.is_current(ticket) {
            log::debug!("[fetch] dropping stale page {ticket:?}");
            return false;
        }
        self.items = match result {
            Ok(response) => {
                let pagination = self.paginator.settle(&response);
                if response.data.is_empty() && pagination.offset == 0 {
                    Resource::not_found()
                } else {
                    Resource::ready(response.data)
                }
            }
            Err(e) => {
                log::warn!("[fetch] page request failed: {e:#}");
                Resource::failed(e)
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceState;
    use anyhow::anyhow;

    fn response(data: Vec<u32>, next: bool) -> ItemsResponse<u32> {
        ItemsResponse {
            data,
            end_cursor: None,
            has_next_page: next,
            has_previous_page: false,
            total_count: Some(4),
        }
    }

    #[test]
    fn tickets_are_unique_across_slots() {
        let mut a = RequestSeq::default();
        let mut b = RequestSeq::default();
        let ta = a.issue();
        let tb = b.issue();
        assert_ne!(ta, tb);
        assert!(a.is_current(ta));
        assert!(!a.is_current(tb));
    }

    #[test]
    fn stale_single_response_is_dropped() {
        let mut slot: Loadable<u32> = Loadable::new();
        let old = slot.begin();
        let new = slot.begin();
        assert!(!slot.settle(old, Ok(Some(1))));
        assert!(matches!(slot.resource().state(), ResourceState::Loading));
        assert!(slot.settle(new, Ok(Some(2))));
        assert!(matches!(slot.resource().state(), ResourceState::Ready(2)));
    }

    #[test]
    fn errors_settle_into_failed_state() {
        let mut slot: Loadable<u32> = Loadable::new();
        let t = slot.begin();
        slot.settle(t, Err(anyhow!("network down")));
        assert!(matches!(slot.resource().state(), ResourceState::Failed(_)));
    }

    #[test]
    fn empty_first_page_is_not_found() {
        let mut paged: PagedLoadable<u32> = PagedLoadable::new(2);
        let (t, _) = paged.begin();
        paged.settle(t, Ok(response(vec![], false)));
        assert!(matches!(paged.items().state(), ResourceState::NotFound));
    }

    #[test]
    fn paging_supersedes_in_flight_request() {
        let mut paged: PagedLoadable<u32> = PagedLoadable::new(2);
        let (first, _) = paged.begin();
        assert!(paged.settle(first, Ok(response(vec![1, 2], true))));

        let (second, options) = paged.next_page().unwrap();
        assert_eq!(options.offset, 2);
        let (restarted, options) = paged.restart();
        assert_eq!(options.offset, 0);

        assert!(!paged.settle(second, Ok(response(vec![3, 4], false))));
        assert!(paged.settle(restarted, Ok(response(vec![9], false))));
        assert_eq!(paged.items().ready_data(), Some(&vec![9]));
        assert_eq!(paged.pagination().map(|p| p.offset), Some(0));
    }
}
