//! Pagination Bar Component

use leptos::prelude::*;
use leptos_listkit::{ListController, PAGE_SIZES};

/// Prev/next, page position and page-size picker for one list
#[component]
pub fn PaginationBar<F, R>(controller: ListController<F, R>) -> impl IntoView
where
    F: Clone + PartialEq + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    let pagination = move || controller.state.with(|s| s.pagination);
    let page = move || controller.query.with(|q| q.page);

    view! {
        <div class="pagination-bar">
            <button
                class="page-btn"
                disabled=move || !pagination().has_prev()
                on:click=move |_| {
                    controller.prev_page();
                }
            >
                "‹ Prev"
            </button>
            <span class="page-info">
                {move || {
                    let p = pagination();
                    if p.total_items == 0 {
                        "No results".to_string()
                    } else {
                        format!(
                            "Page {} of {} · {}–{} of {}",
                            page(),
                            p.total_pages.max(1),
                            p.first_index(),
                            p.last_index(),
                            p.total_items,
                        )
                    }
                }}
            </span>
            <button
                class="page-btn"
                disabled=move || !pagination().has_next()
                on:click=move |_| {
                    controller.next_page();
                }
            >
                "Next ›"
            </button>
            <select
                class="page-size"
                on:change=move |ev| {
                    if let Ok(limit) = event_target_value(&ev).parse::<u32>() {
                        controller.set_limit(limit);
                    }
                }
            >
                {PAGE_SIZES
                    .iter()
                    .map(|size| {
                        let size = *size;
                        view! {
                            <option
                                value=size.to_string()
                                prop:selected=move || controller.query.with(|q| q.limit == size)
                            >
                                {format!("{} / page", size)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
