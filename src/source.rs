use async_trait::async_trait;

use crate::error::Result;
use crate::types::{IssueOrder, IssueState, PageResult};

/// Parameters of a single page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    pub page_size: u32,
    pub states: Vec<IssueState>,
    pub order: IssueOrder,
    /// Cursor to continue after; `None` requests the first page.
    pub after: Option<String>,
}

/// Anything that can hand back a page of issues for a query.
#[async_trait]
pub trait IssueSource: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    async fn fetch_issues(&self, query: &IssueQuery) -> Result<PageResult>;
}

#[cfg(test)]
pub mod fake {
    use std::sync::Mutex;

    use super::*;
    use crate::browser::PAGE_SIZE;
    use crate::error::DeckError;
    use crate::types::Issue;

    /// In-memory source serving `total` numbered issues.
    /// Cursors are `cursor-<offset>`; every query is recorded.
    #[derive(Debug, Default)]
    pub struct FakeSource {
        total: usize,
        failure: Option<String>,
        queries: Mutex<Vec<IssueQuery>>,
    }

    impl FakeSource {
        pub fn paged(total: usize) -> Self {
            Self {
                total,
                ..Default::default()
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                failure: Some(message.to_string()),
                ..Default::default()
            }
        }

        pub fn queries(&self) -> Vec<IssueQuery> {
            self.queries.lock().unwrap().clone()
        }

        /// Page of `PAGE_SIZE` issues starting after `offset`.
        pub fn page(offset: usize, total: usize) -> PageResult {
            let end = (offset + PAGE_SIZE as usize).min(total);
            PageResult {
                issues: (offset + 1..=end)
                    .map(|n| Issue {
                        title: format!("Issue {}", n),
                        url: format!("https://github.com/reactjs/reactjs.org/issues/{}", n),
                    })
                    .collect(),
                total_count: total as u64,
                end_cursor: Some(format!("cursor-{}", end)),
                has_next_page: end < total,
            }
        }
    }

    #[async_trait]
    impl IssueSource for FakeSource {
        fn name(&self) -> &str {
            "fake"
        }

        async fn fetch_issues(&self, query: &IssueQuery) -> Result<PageResult> {
            self.queries.lock().unwrap().push(query.clone());
            if let Some(message) = &self.failure {
                return Err(DeckError::Api(message.clone()));
            }
            let offset = query
                .after
                .as_deref()
                .and_then(|c| c.strip_prefix("cursor-"))
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or(0);
            Ok(Self::page(offset, self.total))
        }
    }
}
