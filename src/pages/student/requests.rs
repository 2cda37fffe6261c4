//! My Requests Page (student)
//!
//! Ask for material that is not on the platform yet and follow the status of
//! earlier asks.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::{use_debounced, use_paginated_list, MutationDispatcher};

use crate::api::{NewRequest, RequestFilter};
use crate::components::{
    OptionSelect, PaginationBar, RequestStatusSelect, ResetButton, TextArea, TextField,
};
use crate::context::use_app;
use crate::models::RequestStatus;
use crate::pages::{announce, fetch_reporter};
use crate::store::{subject_options, use_catalog};

fn status_class(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "badge pending",
        RequestStatus::Fulfilled => "badge fulfilled",
        RequestStatus::Rejected => "badge rejected",
    }
}

#[component]
pub fn MyRequestsPage() -> impl IntoView {
    let ctx = use_app();
    let catalog = use_catalog();
    let config = ctx.config();
    let subjects = subject_options(catalog, Signal::stored(String::new()));

    let title_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(None::<RequestStatus>);
    let raw = Signal::derive(move || RequestFilter {
        title: title_filter.get(),
        status: status_filter.get(),
    });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().my_requests(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let subject = RwSignal::new(String::new());
    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.api();
        let request = NewRequest {
            title: title.get_untracked().trim().to_string(),
            description: description.get_untracked(),
            subject: Some(subject.get_untracked()).filter(|s| !s.is_empty()),
        };
        spawn_local(async move {
            let outcome = MutationDispatcher::new("Request sent")
                .submit(
                    request,
                    |r| async move { api.create_request(r).await },
                    || list.refetch(),
                )
                .await;
            if announce(ctx, &outcome) {
                title.set(String::new());
                description.set(String::new());
                subject.set(String::new());
            }
        });
    };

    view! {
        <section class="page my-requests-page">
            <h2>"My requests"</h2>

            <form class="entity-form request-form" on:submit=submit>
                <TextField value=title placeholder="What are you looking for?" />
                <TextArea value=description placeholder="Details: syllabus unit, year, format..." />
                <OptionSelect value=subject options=subjects placeholder="Subject (optional)" />
                <button type="submit" class="primary">"Send request"</button>
            </form>

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
                        <th>"Subject"</th>
                        <th>"Asked on"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        list.items()
                            .into_iter()
                            .map(|request| {
                                view! {
                                    <tr>
                                        <td>{request.title.clone()}</td>
                                        <td>
                                            {request.subject.as_ref().map(|s| s.subject_name.clone()).unwrap_or_default()}
                                        </td>
                                        <td>
                                            {request
                                                .created_at
                                                .map(|at| at.format("%d %b %Y").to_string())
                                                .unwrap_or_default()}
                                        </td>
                                        <td>
                                            <span class=status_class(request.status)>{request.status.label()}</span>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <Show when=move || list.state.with(|s| s.is_settled_empty())>
                <p class="empty">{move || list.state.with(|s| s.notice_or("You have not asked for anything yet."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}
