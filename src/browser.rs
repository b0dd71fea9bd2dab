//! Paginated issue browsing state.
//!
//! GitHub's GraphQL connections only page forward, so going back to an
//! earlier page means replaying the cursor that originally led to it.
//! `cursor_history[i]` holds the cursor that requests page `i + 2`; page 1
//! is always fetched without a cursor.
//!
//! Every fetch is tagged with a ticket. Only the most recently issued
//! request may resolve the browser; anything older is dropped on arrival.

use tracing::{debug, trace, warn};

use crate::source::IssueQuery;
use crate::types::{Issue, IssueOrder, IssueState, PageResult};

pub const PAGE_SIZE: u32 = 25;

/// A fetch the browser wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: u64,
    pub page: u32,
    pub state: IssueState,
    pub after: Option<String>,
}

impl PageRequest {
    pub fn query(&self, page_size: u32) -> IssueQuery {
        IssueQuery {
            page_size,
            states: vec![self.state],
            order: IssueOrder::CreatedDesc,
            after: self.after.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Loading,
    Failed(String),
    Ready(PageResult),
}

#[derive(Debug)]
pub struct IssueBrowser {
    page_size: u32,
    current_page: u32,
    cursor_history: Vec<String>,
    selected_state: IssueState,
    fetch: FetchState,
    target: Option<PageRequest>,
    next_ticket: u64,
}

impl IssueBrowser {
    pub fn new(page_size: u32, state: IssueState) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            cursor_history: Vec::new(),
            selected_state: state,
            fetch: FetchState::Loading,
            target: None,
            next_ticket: 0,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn selected_state(&self) -> IssueState {
        self.selected_state
    }

    pub fn cursor_history(&self) -> &[String] {
        &self.cursor_history
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    /// Issues of the loaded page; empty while loading or after a failure.
    pub fn issues(&self) -> &[Issue] {
        match &self.fetch {
            FetchState::Ready(page) => &page.issues,
            _ => &[],
        }
    }

    /// Pages available under the current filter. Zero until a page has loaded.
    pub fn total_pages(&self) -> u32 {
        match &self.fetch {
            FetchState::Ready(page) => {
                let pages = page.total_count.div_ceil(u64::from(self.page_size));
                u32::try_from(pages).unwrap_or(u32::MAX)
            }
            _ => 0,
        }
    }

    /// Initial fetch: first page of the selected filter.
    pub fn start(&mut self) -> PageRequest {
        self.current_page = 1;
        self.cursor_history.clear();
        self.issue(None)
    }

    /// Switch the state filter. `raw` is the value reported by the filter
    /// control; values that are not an issue state are ignored.
    pub fn on_filter_change(&mut self, raw: &str) -> Option<PageRequest> {
        let state = match raw.parse::<IssueState>() {
            Ok(state) => state,
            Err(err) => {
                warn!(value = raw, %err, "ignoring filter change");
                return None;
            }
        };

        self.selected_state = state;
        self.current_page = 1;
        // cursors belong to the previous filter's result set
        self.cursor_history.clear();
        Some(self.issue(None))
    }

    pub fn on_page_change(&mut self, requested: u32) -> Option<PageRequest> {
        let total = self.total_pages();
        if requested < 1 || requested > total || requested == self.current_page {
            trace!(requested, current = self.current_page, total, "page change rejected");
            return None;
        }

        let end_cursor = match &self.fetch {
            FetchState::Ready(page) => page.end_cursor.clone(),
            _ => None,
        };

        let forward = requested > self.current_page;
        if forward && self.cursor_history.len() < (requested - 1) as usize {
            self.cursor_history
                .push(end_cursor.clone().unwrap_or_default());
        }

        let after = if forward {
            end_cursor
        } else {
            self.cursor_for(requested)
        };

        self.current_page = requested;
        Some(self.issue(after))
    }

    /// Fetch the current page again with the cursor that produced it.
    pub fn refresh(&mut self) -> PageRequest {
        let after = self.cursor_for(self.current_page);
        self.issue(after)
    }

    /// Apply the outcome of a fetch. Returns false when the outcome belongs
    /// to a request that has since been superseded.
    pub fn resolve(&mut self, ticket: u64, outcome: Result<PageResult, String>) -> bool {
        match &self.target {
            Some(target) if target.ticket == ticket && self.fetch == FetchState::Loading => {}
            _ => {
                debug!(ticket, "discarding stale page result");
                return false;
            }
        }

        self.fetch = match outcome {
            Ok(page) => {
                debug!(
                    ticket,
                    issues = page.issues.len(),
                    total = page.total_count,
                    has_next_page = page.has_next_page,
                    "page loaded"
                );
                FetchState::Ready(page)
            }
            Err(message) => {
                warn!(ticket, %message, "page fetch failed");
                FetchState::Failed(message)
            }
        };
        true
    }

    fn cursor_for(&self, page: u32) -> Option<String> {
        if page < 2 {
            return None;
        }
        self.cursor_history
            .get((page - 2) as usize)
            .filter(|c| !c.is_empty())
            .cloned()
    }

    fn issue(&mut self, after: Option<String>) -> PageRequest {
        self.next_ticket += 1;
        let request = PageRequest {
            ticket: self.next_ticket,
            page: self.current_page,
            state: self.selected_state,
            after: after.filter(|c| !c.is_empty()),
        };
        debug!(
            ticket = request.ticket,
            page = request.page,
            state = request.state.as_api_str(),
            after = ?request.after,
            "issuing page fetch"
        );
        self.fetch = FetchState::Loading;
        self.target = Some(request.clone());
        request
    }
}
