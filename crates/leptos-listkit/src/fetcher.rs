//! Paginated List Fetcher
//!
//! Runs one fetch for a query against a `ListSource` and records the result
//! in the screen's `ListState`.

use std::cell::RefCell;
use std::fmt::Display;

use async_trait::async_trait;
use leptos::prelude::*;

use crate::list_state::{FetchOutcome, ListState};
use crate::mutation::{ServerMessage, FALLBACK_ERROR};
use crate::pagination::Page;

/// Filters plus the page window to fetch
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<F> {
    pub filters: F,
    pub page: u32,
    pub limit: u32,
}

impl<F> ListQuery<F> {
    pub fn new(filters: F, limit: u32) -> Self {
        Self {
            filters,
            page: 1,
            limit: limit.max(1),
        }
    }
}

/// Filters that translate into list-endpoint query parameters
pub trait QueryParams {
    /// Non-empty filter fields only
    fn params(&self) -> Vec<(&'static str, String)>;
}

impl QueryParams for () {
    fn params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// `pageno`, `limit` and then the filter fields
pub fn query_pairs<F: QueryParams>(query: &ListQuery<F>) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("pageno", query.page.to_string()),
        ("limit", query.limit.to_string()),
    ];
    pairs.extend(query.filters.params());
    pairs
}

/// Something that can serve one page of records
#[async_trait(?Send)]
pub trait ListSource {
    type Filter: Clone + PartialEq;
    type Record: Clone;
    type Error: Display + ServerMessage;

    async fn fetch_page(&self, query: &ListQuery<Self::Filter>) -> Result<Page<Self::Record>, Self::Error>;
}

/// Where a fetch records its result. Returns `None` once the owner is gone.
pub trait StateCell<R> {
    fn with_state<T>(&self, f: impl FnOnce(&mut ListState<R>) -> T) -> Option<T>;
}

impl<R> StateCell<R> for RefCell<ListState<R>> {
    fn with_state<T>(&self, f: impl FnOnce(&mut ListState<R>) -> T) -> Option<T> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<R: Send + Sync + 'static> StateCell<R> for RwSignal<ListState<R>> {
    fn with_state<T>(&self, f: impl FnOnce(&mut ListState<R>) -> T) -> Option<T> {
        self.try_update(f)
    }
}

/// Fetch `query` from `source` and record it in `cell`
pub async fn fetch_into<S, C>(source: &S, query: &ListQuery<S::Filter>, cell: &C) -> FetchOutcome
where
    S: ListSource + ?Sized,
    C: StateCell<S::Record>,
{
    let Some(ticket) = cell.with_state(|s| s.begin()) else {
        return FetchOutcome::Detached;
    };

    let result = source.fetch_page(query).await;
    let outcome = match result {
        Ok(page) => {
            log::debug!(
                "[list] page {} of {} ({} records)",
                query.page,
                page.total_pages,
                page.data.len()
            );
            cell.with_state(|s| s.succeed(ticket, query.page, query.limit, page))
        }
        Err(err) => {
            log::warn!("[list] fetch of page {} failed: {}", query.page, err);
            let message = err
                .server_message()
                .unwrap_or_else(|| FALLBACK_ERROR.to_string());
            cell.with_state(|s| s.fail(ticket, message))
        }
    };
    outcome.unwrap_or(FetchOutcome::Detached)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[derive(Clone, Debug, PartialEq, Default)]
    pub struct NameFilter {
        pub name: String,
    }

    impl QueryParams for NameFilter {
        fn params(&self) -> Vec<(&'static str, String)> {
            if self.name.is_empty() {
                vec![]
            } else {
                vec![("typeName", self.name.clone())]
            }
        }
    }

    /// In-memory source over a fixed list of names
    pub struct FakeSource {
        pub rows: RefCell<Vec<String>>,
        pub calls: RefCell<Vec<ListQuery<NameFilter>>>,
        pub fail_next: Cell<bool>,
    }

    impl FakeSource {
        pub fn new(rows: &[&str]) -> Self {
            Self {
                rows: RefCell::new(rows.iter().map(|s| s.to_string()).collect()),
                calls: RefCell::new(Vec::new()),
                fail_next: Cell::new(false),
            }
        }
    }

    #[async_trait(?Send)]
    impl ListSource for FakeSource {
        type Filter = NameFilter;
        type Record = String;
        type Error = String;

        async fn fetch_page(&self, query: &ListQuery<NameFilter>) -> Result<Page<String>, String> {
            self.calls.borrow_mut().push(query.clone());
            if self.fail_next.replace(false) {
                return Err("server unavailable".to_string());
            }
            let matching: Vec<String> = self
                .rows
                .borrow()
                .iter()
                .filter(|r| r.contains(&query.filters.name))
                .cloned()
                .collect();
            let limit = query.limit as usize;
            let total = matching.len();
            let data = matching
                .into_iter()
                .skip((query.page as usize - 1) * limit)
                .take(limit)
                .collect();
            Ok(Page {
                data,
                total_pages: total.div_ceil(limit) as u32,
                total_documents: total as u64,
                message: None,
            })
        }
    }

    #[test]
    fn test_query_pairs_skip_empty_filters() {
        let query = ListQuery::new(NameFilter::default(), 10);
        assert_eq!(
            query_pairs(&query),
            vec![("pageno", "1".to_string()), ("limit", "10".to_string())]
        );

        let mut query = ListQuery::new(NameFilter { name: "cal".into() }, 5);
        query.page = 2;
        assert_eq!(
            query_pairs(&query),
            vec![
                ("pageno", "2".to_string()),
                ("limit", "5".to_string()),
                ("typeName", "cal".to_string()),
            ]
        );
    }

    #[test]
    fn test_fetch_into_applies_page() {
        let source = FakeSource::new(&["calculus", "algebra", "calc notes"]);
        let cell = RefCell::new(ListState::new(10));
        let query = ListQuery::new(NameFilter { name: "cal".into() }, 10);

        let outcome = block_on(fetch_into(&source, &query, &cell));

        assert_eq!(outcome, FetchOutcome::Applied { message: None });
        let state = cell.borrow();
        assert_eq!(state.items, vec!["calculus".to_string(), "calc notes".to_string()]);
        assert_eq!(state.pagination.total_items, 2);
        assert_eq!(source.calls.borrow().len(), 1);
    }

    #[test]
    fn test_fetch_failure_preserves_snapshot() {
        let source = FakeSource::new(&["a", "b"]);
        let cell = RefCell::new(ListState::new(10));
        let query = ListQuery::new(NameFilter::default(), 10);
        block_on(fetch_into(&source, &query, &cell));

        source.fail_next.set(true);
        let outcome = block_on(fetch_into(&source, &query, &cell));

        assert_eq!(outcome, FetchOutcome::Failed("server unavailable".into()));
        assert_eq!(cell.borrow().items.len(), 2);
    }
}
