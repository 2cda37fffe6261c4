//! Students Page (admin)
//!
//! Read-only roster; the only mutation is blocking or unblocking an account.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos_listkit::{use_debounced, use_paginated_list};

use crate::api::{StatusFilter, StudentFilter};
use crate::components::{PaginationBar, ResetButton, StatusSelect, StatusToggleButton, TextField};
use crate::context::use_app;
use crate::pages::{fetch_reporter, flip_status};

fn joined_on(created_at: Option<DateTime<Utc>>) -> String {
    created_at
        .map(|at| at.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn StudentsPage() -> impl IntoView {
    let ctx = use_app();
    let config = ctx.config();

    let search = RwSignal::new(String::new());
    let status_filter = RwSignal::new(StatusFilter::All);
    let raw = Signal::derive(move || StudentFilter {
        search: search.get(),
        status: status_filter.get(),
    });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().students(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    view! {
        <section class="page students-page">
            <h2>"Students"</h2>

            <div class="filter-bar">
                <TextField value=search placeholder="Search name or email..." />
                <StatusSelect value=status_filter />
                <ResetButton on_reset=move |_| {
                    search.set(String::new());
                    status_filter.set(StatusFilter::All);
                } />
            </div>

            <table class="entity-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Phone"</th>
                        <th>"Joined"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        list.items()
                            .into_iter()
                            .map(|student| {
                                let id = student.id.clone();
                                let active = student.is_active;
                                view! {
                                    <tr>
                                        <td>{student.name.clone()}</td>
                                        <td>{student.email.clone()}</td>
                                        <td>{student.phone.clone().unwrap_or_default()}</td>
                                        <td>{joined_on(student.created_at)}</td>
                                        <td>
                                            <StatusToggleButton
                                                active=active
                                                on_confirm=move |_| {
                                                    let id = id.clone();
                                                    let api = ctx.api();
                                                    flip_status(ctx, list, move || async move {
                                                        api.set_student_status(&id, !active).await
                                                    });
                                                }
                                            />
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <Show when=move || list.state.with(|s| s.is_settled_empty())>
                <p class="empty">{move || list.state.with(|s| s.notice_or("No students match these filters."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_joined_on() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 10, 30, 0).unwrap();
        assert_eq!(joined_on(Some(at)), "07 Mar 2024");
        assert_eq!(joined_on(None), "-");
    }
}
