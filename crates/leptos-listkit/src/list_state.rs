//! List State
//!
//! Per-screen state container: the current snapshot, its pagination metadata
//! and the request bookkeeping. Every fetch takes a ticket; only the most
//! recently issued ticket may write results, so a slow older response can
//! never overwrite a newer one.

use crate::pagination::{Page, Pagination};

/// Ticket handed out when a fetch starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What became of a finished fetch
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    /// Snapshot replaced; carries the server message, if any
    Applied { message: Option<String> },
    /// Request failed; previous snapshot kept
    Failed(String),
    /// A newer fetch was issued meanwhile; result dropped
    Superseded,
    /// The owning screen was torn down before the fetch could be recorded
    Detached,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<R> {
    pub items: Vec<R>,
    pub pagination: Pagination,
    pub loading: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    latest: u64,
    loaded_once: bool,
}

impl<R> ListState<R> {
    pub fn new(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::new(limit),
            loading: false,
            message: None,
            error: None,
            latest: 0,
            loaded_once: false,
        }
    }

    /// Mark a fetch in flight and supersede any earlier one
    pub fn begin(&mut self) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        FetchTicket(self.latest)
    }

    pub fn is_latest(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Replace the snapshot wholesale with a fetched page
    pub fn succeed(&mut self, ticket: FetchTicket, page: u32, limit: u32, result: Page<R>) -> FetchOutcome {
        if !self.is_latest(ticket) {
            return FetchOutcome::Superseded;
        }
        self.items = result.data;
        self.pagination
            .apply(page, limit, result.total_pages, result.total_documents);
        self.loading = false;
        self.loaded_once = true;
        self.error = None;
        self.message = result.message.clone();
        FetchOutcome::Applied {
            message: result.message,
        }
    }

    /// Record a failure without touching the snapshot
    pub fn fail(&mut self, ticket: FetchTicket, error: String) -> FetchOutcome {
        if !self.is_latest(ticket) {
            return FetchOutcome::Superseded;
        }
        self.loading = false;
        self.error = Some(error.clone());
        FetchOutcome::Failed(error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Server's own note for the last page, else `fallback`
    pub fn notice_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// True once a fetch has succeeded and returned no records
    pub fn is_settled_empty(&self) -> bool {
        self.loaded_once && !self.loading && self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(data: Vec<&'static str>, total_pages: u32, total: u64) -> Page<&'static str> {
        Page {
            data,
            total_pages,
            total_documents: total,
            message: None,
        }
    }

    #[test]
    fn test_success_replaces_snapshot() {
        let mut state = ListState::new(2);
        let ticket = state.begin();
        assert!(state.loading);

        let outcome = state.succeed(ticket, 1, 2, page(vec!["a", "b"], 2, 3));
        assert_eq!(outcome, FetchOutcome::Applied { message: None });
        assert_eq!(state.items, vec!["a", "b"]);
        assert_eq!(state.pagination.total_pages, 2);
        assert_eq!(state.pagination.total_items, 3);
        assert!(!state.loading);
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut state = ListState::new(10);
        let first = state.begin();
        state.succeed(first, 1, 10, page(vec!["kept"], 1, 1));

        let second = state.begin();
        let outcome = state.fail(second, "boom".to_string());
        assert_eq!(outcome, FetchOutcome::Failed("boom".to_string()));
        assert_eq!(state.items, vec!["kept"]);
        assert_eq!(state.pagination.total_items, 1);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading);
    }

    #[test]
    fn test_older_response_cannot_overwrite_newer() {
        let mut state = ListState::new(10);
        let older = state.begin();
        let newer = state.begin();

        state.succeed(newer, 1, 10, page(vec!["new"], 1, 1));
        let outcome = state.succeed(older, 1, 10, page(vec!["old"], 1, 1));

        assert_eq!(outcome, FetchOutcome::Superseded);
        assert_eq!(state.items, vec!["new"]);
    }

    #[test]
    fn test_superseded_request_keeps_loading_flag() {
        let mut state: ListState<&str> = ListState::new(10);
        let older = state.begin();
        let _newer = state.begin();

        assert_eq!(state.fail(older, "late".into()), FetchOutcome::Superseded);
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_server_message_surfaces() {
        let mut state = ListState::new(10);
        let ticket = state.begin();
        let mut result = page(vec![], 0, 0);
        result.message = Some("No materials found".into());

        let outcome = state.succeed(ticket, 1, 10, result);
        assert_eq!(
            outcome,
            FetchOutcome::Applied {
                message: Some("No materials found".into())
            }
        );
        assert!(state.is_settled_empty());
        assert_eq!(state.notice_or("Nothing yet."), "No materials found");
    }

    #[test]
    fn test_blank_server_message_falls_back() {
        let mut state = ListState::new(10);
        let ticket = state.begin();
        let mut result = page(vec!["a"], 1, 1);
        result.message = Some("  ".into());
        state.succeed(ticket, 1, 10, result);

        assert_eq!(state.notice_or("Nothing yet."), "Nothing yet.");
    }
}
