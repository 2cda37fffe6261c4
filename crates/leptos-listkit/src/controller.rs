//! List Controller
//!
//! Reactive wiring of the workflow for one screen: settled filters feed the
//! query, every query change (or explicit refetch) runs one fetch, and the
//! result lands in the screen's `ListState`. Everything is owned by the
//! component that calls `use_paginated_list` and goes away with it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::fetcher::{fetch_into, ListQuery, ListSource};
use crate::list_state::{FetchOutcome, ListState};

pub struct ListController<F, R>
where
    F: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    pub state: RwSignal<ListState<R>>,
    pub query: RwSignal<ListQuery<F>>,
    reload: RwSignal<u64>,
}

impl<F, R> Clone for ListController<F, R>
where
    F: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<F, R> Copy for ListController<F, R>
where
    F: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
}

impl<F, R> ListController<F, R>
where
    F: Clone + PartialEq + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Jump to `page` if the last fetch reported it; returns whether it did
    pub fn go_to_page(&self, page: u32) -> bool {
        let allowed = self.state.with_untracked(|s| s.pagination.can_go_to(page));
        if !allowed {
            return false;
        }
        if self.query.with_untracked(|q| q.page != page) {
            self.query.update(|q| q.page = page);
        } else {
            // Same page asked for again: still fetch it
            self.refetch();
        }
        true
    }

    pub fn next_page(&self) -> bool {
        let page = self.query.with_untracked(|q| q.page);
        self.go_to_page(page + 1)
    }

    pub fn prev_page(&self) -> bool {
        let page = self.query.with_untracked(|q| q.page);
        page > 1 && self.go_to_page(page - 1)
    }

    /// Change page size and start over at page 1
    pub fn set_limit(&self, limit: u32) {
        let limit = limit.max(1);
        if self.query.with_untracked(|q| q.limit != limit) {
            self.query.update(|q| {
                q.limit = limit;
                q.page = 1;
            });
        }
    }

    /// Apply new settled filters; a real change resets to page 1
    pub fn set_filters(&self, filters: F) {
        if self.query.with_untracked(|q| q.filters != filters) {
            self.query.update(|q| {
                q.filters = filters;
                q.page = 1;
            });
        }
    }

    /// Run the current query again
    pub fn refetch(&self) {
        self.reload.update(|n| *n += 1);
    }

    pub fn items(&self) -> Vec<R> {
        self.state.with(|s| s.items.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }
}

/// Build the controller for a screen.
///
/// `filters` should already be debounced. `on_outcome` sees every finished
/// fetch, so the screen can surface server messages and errors.
pub fn use_paginated_list<S>(
    source: S,
    filters: Signal<S::Filter>,
    limit: u32,
    on_outcome: impl Fn(FetchOutcome) + Clone + 'static,
) -> ListController<S::Filter, S::Record>
where
    S: ListSource + Clone + 'static,
    S::Filter: Send + Sync + 'static,
    S::Record: Send + Sync + 'static,
{
    let state = RwSignal::new(ListState::new(limit));
    let query = RwSignal::new(ListQuery::new(filters.get_untracked(), limit));
    let reload = RwSignal::new(0u64);
    let controller = ListController { state, query, reload };

    Effect::new(move |_| {
        let settled = filters.get();
        controller.set_filters(settled);
    });

    Effect::new(move |_| {
        let _ = reload.get();
        let current = query.get();
        let source = source.clone();
        let on_outcome = on_outcome.clone();
        spawn_local(async move {
            let outcome = fetch_into(&source, &current, &state).await;
            if outcome != FetchOutcome::Detached {
                on_outcome(outcome);
            }
        });
    });

    controller
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::DebounceGate;

    /// Controller whose last fetch reported page 1 of `total_pages`
    fn controller(total_pages: u32) -> ListController<String, u32> {
        let state = RwSignal::new(ListState::new(10));
        state.update(|s| s.pagination.apply(1, 10, total_pages, u64::from(total_pages) * 10));
        ListController {
            state,
            query: RwSignal::new(ListQuery::new(String::new(), 10)),
            reload: RwSignal::new(0),
        }
    }

    fn page(list: &ListController<String, u32>) -> u32 {
        list.query.with_untracked(|q| q.page)
    }

    fn reloads(list: &ListController<String, u32>) -> u64 {
        list.reload.get_untracked()
    }

    #[test]
    fn test_current_page_is_fetched_again() {
        let owner = Owner::new();
        owner.set();
        let list = controller(3);

        assert!(list.go_to_page(1));
        assert_eq!(page(&list), 1);
        assert_eq!(reloads(&list), 1);
    }

    #[test]
    fn test_page_jump_within_bounds() {
        let owner = Owner::new();
        owner.set();
        let list = controller(3);

        assert!(list.go_to_page(3));
        assert_eq!(page(&list), 3);
        assert_eq!(reloads(&list), 0);

        assert!(!list.go_to_page(4));
        assert!(!list.go_to_page(0));
        assert_eq!(page(&list), 3);
    }

    #[test]
    fn test_prev_and_next_stay_in_bounds() {
        let owner = Owner::new();
        owner.set();
        let list = controller(2);

        assert!(!list.prev_page());
        assert_eq!(page(&list), 1);

        assert!(list.next_page());
        assert_eq!(page(&list), 2);
        assert!(!list.next_page());
        assert_eq!(page(&list), 2);

        assert!(list.prev_page());
        assert_eq!(page(&list), 1);
    }

    #[test]
    fn test_empty_result_allows_no_page() {
        let owner = Owner::new();
        owner.set();
        let list = controller(0);

        assert!(!list.go_to_page(1));
        assert!(!list.next_page());
        assert_eq!(reloads(&list), 0);
    }

    #[test]
    fn test_new_filters_reset_to_first_page() {
        let owner = Owner::new();
        owner.set();
        let list = controller(3);
        list.go_to_page(3);

        list.set_filters("cal".to_string());
        assert_eq!(page(&list), 1);
        assert_eq!(list.query.with_untracked(|q| q.filters.clone()), "cal");
    }

    #[test]
    fn test_same_filters_keep_page() {
        let owner = Owner::new();
        owner.set();
        let list = controller(3);
        list.set_filters("cal".to_string());
        list.go_to_page(2);

        list.set_filters("cal".to_string());
        assert_eq!(page(&list), 2);
    }

    #[test]
    fn test_page_size_change_resets_to_first_page() {
        let owner = Owner::new();
        owner.set();
        let list = controller(3);
        list.go_to_page(2);

        list.set_limit(20);
        assert_eq!(page(&list), 1);
        assert_eq!(list.query.with_untracked(|q| q.limit), 20);

        list.go_to_page(2);
        list.set_limit(20);
        assert_eq!(page(&list), 2);

        list.set_limit(0);
        assert_eq!(list.query.with_untracked(|q| q.limit), 1);
    }

    #[test]
    fn test_refetch_keeps_query() {
        let owner = Owner::new();
        owner.set();
        let list = controller(3);
        list.set_filters("cal".to_string());
        list.go_to_page(2);
        let before = list.query.get_untracked();

        list.refetch();
        list.refetch();
        assert_eq!(reloads(&list), 2);
        assert_eq!(list.query.get_untracked(), before);
    }

    #[test]
    fn test_typing_burst_changes_query_once() {
        let owner = Owner::new();
        owner.set();
        let list = controller(3);
        let gate = DebounceGate::new();

        // "c", "a", "l" typed within the window; each keystroke arms a timer
        let armed: Vec<_> = ["c", "ca", "cal"]
            .into_iter()
            .map(|typed| (gate.arm(), typed))
            .collect();

        let mut query_changes = 0;
        for (ticket, typed) in armed {
            if gate.is_current(ticket) {
                let before = list.query.get_untracked();
                list.set_filters(typed.to_string());
                if list.query.get_untracked() != before {
                    query_changes += 1;
                }
            }
        }

        assert_eq!(query_changes, 1);
        assert_eq!(list.query.with_untracked(|q| q.filters.clone()), "cal");
        assert_eq!(reloads(&list), 0);
    }
}
