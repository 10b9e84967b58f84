use tracing::debug;

use crate::models::{Query, SortField, SortOrder};

/// A snapshot of the query, tagged with the order it was issued in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: Query,
}

/// A change requested through the feed controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryChange {
    /// Fetch the current query again.
    Refresh,
    Page(u32),
    SortField(SortField),
    SortOrder(SortOrder),
    Search(String),
}

/// Owns paging, sorting and the search term.
///
/// Every setter returns the fetch the change calls for, or `None` when the
/// query ended up unchanged.
#[derive(Debug, Default)]
pub struct QueryController {
    query: Query,
    next_seq: u64,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn apply(&mut self, change: &QueryChange, known_total: u64) -> Option<FetchRequest> {
        match change {
            QueryChange::Refresh => Some(self.refetch()),
            QueryChange::Page(page) => self.set_page(*page, known_total),
            QueryChange::SortField(field) => self.set_sort_field(*field),
            QueryChange::SortOrder(order) => self.set_sort_order(*order),
            QueryChange::Search(term) => self.set_search_term(term),
        }
    }

    /// Re-issue the current query without changing it, e.g. on first display.
    pub fn refetch(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Direct navigation. `known_total` bounds the last reachable page, but
    /// stepping back toward it from a page past the end is always allowed.
    pub fn set_page(&mut self, page: u32, known_total: u64) -> Option<FetchRequest> {
        let last = self.query.page_count(known_total).max(1);
        if page == 0 || (page > last && page >= self.query.page) {
            debug!(page, last, "ignoring out of range page");
            return None;
        }
        let mut next = self.query.clone();
        next.page = page;
        self.replace(next)
    }

    pub fn set_sort_field(&mut self, field: SortField) -> Option<FetchRequest> {
        let mut next = self.query.clone();
        next.sort_field = field;
        next.page = 1;
        self.replace(next)
    }

    pub fn set_sort_order(&mut self, order: SortOrder) -> Option<FetchRequest> {
        let mut next = self.query.clone();
        next.sort_order = order;
        next.page = 1;
        self.replace(next)
    }

    /// Callers must pass the auth gate first.
    pub fn set_search_term(&mut self, term: &str) -> Option<FetchRequest> {
        let mut next = self.query.clone();
        next.search_term = term.trim().to_string();
        next.page = 1;
        self.replace(next)
    }

    fn replace(&mut self, next: Query) -> Option<FetchRequest> {
        if next == self.query {
            return None;
        }
        self.query = next;
        Some(self.issue())
    }

    fn issue(&mut self) -> FetchRequest {
        self.next_seq += 1;
        FetchRequest {
            seq: self.next_seq,
            query: self.query.clone(),
        }
    }
}
