//! Library Page (student)

use leptos::prelude::*;
use leptos_listkit::{use_debounced, use_paginated_list};

use crate::api::MaterialFilter;
use crate::components::{MaterialCard, PaginationBar, TextField};
use crate::context::{use_app, Route};
use crate::pages::fetch_reporter;

#[component]
pub fn LibraryPage() -> impl IntoView {
    let ctx = use_app();
    let config = ctx.config();

    let title_filter = RwSignal::new(String::new());
    let raw = Signal::derive(move || MaterialFilter {
        title: title_filter.get(),
        ..Default::default()
    });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().material_library(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    view! {
        <section class="page library-page">
            <h2>"My library"</h2>

            <div class="filter-bar">
                <TextField value=title_filter placeholder="Search your materials..." />
            </div>

            <div class="material-grid">
                {move || {
                    list.items()
                        .into_iter()
                        .map(|material| {
                            let link = material.file_url.clone();
                            view! {
                                <MaterialCard material=material>
                                    {match link {
                                        Some(href) => view! {
                                            <a class="primary" href=href target="_blank" rel="noopener">
                                                "Download"
                                            </a>
                                        }
                                        .into_any(),
                                        None => view! { <span class="muted">"File pending"</span> }.into_any(),
                                    }}
                                </MaterialCard>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <Show when=move || list.state.with(|s| s.is_settled_empty())>
                <p class="empty">
                    {move || list.state.with(|s| s.notice_or("Nothing here yet."))}
                    " "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(Route::StudentBrowse);
                    }>
                        "Browse materials"
                    </a>
                </p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}
