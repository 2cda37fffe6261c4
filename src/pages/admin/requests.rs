//! Material Requests Page (admin)

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::{use_debounced, use_paginated_list, MutationDispatcher};

use crate::api::RequestFilter;
use crate::components::{PaginationBar, RequestStatusSelect, ResetButton, TextField};
use crate::context::use_app;
use crate::markdown::excerpt;
use crate::models::RequestStatus;
use crate::pages::{announce, fetch_reporter};

#[component]
pub fn RequestsPage() -> impl IntoView {
    let ctx = use_app();
    let config = ctx.config();

    let title_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(None::<RequestStatus>);
    let raw = Signal::derive(move || RequestFilter {
        title: title_filter.get(),
        status: status_filter.get(),
    });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().requests(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    let change_status = move |id: String, current: RequestStatus, raw: String| {
        let Some(next) = RequestStatus::parse(&raw) else {
            return;
        };
        if next == current {
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            let outcome = MutationDispatcher::new("Request updated")
                .send(
                    next,
                    |status| async move { api.set_request_status(&id, status).await },
                    || list.refetch(),
                )
                .await;
            announce(ctx, &outcome);
        });
    };

    view! {
        <section class="page requests-page">
            <h2>"Material requests"</h2>

            <div class="filter-bar">
                <TextField value=title_filter placeholder="Search title..." />
                <RequestStatusSelect value=status_filter />
                <ResetButton on_reset=move |_| {
                    title_filter.set(String::new());
                    status_filter.set(None);
                } />
            </div>

            <table class="entity-table">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Student"</th>
                        <th>"Subject"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        list.items()
                            .into_iter()
                            .map(|request| {
                                let id = request.id.clone();
                                let current = request.status;
                                view! {
                                    <tr>
                                        <td>
                                            <div class="title">{request.title.clone()}</div>
                                            <div class="excerpt">{excerpt(&request.description, 100)}</div>
                                        </td>
                                        <td>{request.student.as_ref().map(|s| s.name.clone()).unwrap_or_default()}</td>
                                        <td>
                                            {request.subject.as_ref().map(|s| s.subject_name.clone()).unwrap_or_default()}
                                        </td>
                                        <td>
                                            <select
                                                class="status-select"
                                                on:change=move |ev| change_status(id.clone(), current, event_target_value(&ev))
                                            >
                                                {RequestStatus::ALL
                                                    .into_iter()
                                                    .map(|status| {
                                                        view! {
                                                            <option value=status.as_str() selected=status == current>
                                                                {status.label()}
                                                            </option>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </select>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <Show when=move || list.state.with(|s| s.is_settled_empty())>
                <p class="empty">{move || list.state.with(|s| s.notice_or("No requests match these filters."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}
