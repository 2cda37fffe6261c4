//! Courses Page (admin)

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::{use_debounced, use_paginated_list, FieldValue, MutationDispatcher};

use crate::api::{CourseFilter, NewCourse, StatusFilter};
use crate::components::{PaginationBar, ResetButton, StatusSelect, StatusToggleButton, TextField};
use crate::context::use_app;
use crate::models::Course;
use crate::pages::{announce, edited_fields, fetch_reporter, flip_status};
use crate::store::{refresh_catalog, use_catalog};

#[component]
pub fn CoursesPage() -> impl IntoView {
    let ctx = use_app();
    let catalog = use_catalog();
    let config = ctx.config();

    // Filters
    let name_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(StatusFilter::All);
    let raw = Signal::derive(move || CourseFilter {
        course_name: name_filter.get(),
        status: status_filter.get(),
    });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().courses(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    // Form: create, or edit when `editing` holds the original
    let editing = RwSignal::new(None::<Course>);
    let course_name = RwSignal::new(String::new());

    let reset_form = move || {
        editing.set(None);
        course_name.set(String::new());
    };
    let start_edit = move |course: Course| {
        course_name.set(course.course_name.clone());
        editing.set(Some(course));
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.api();
        let name = course_name.get_untracked();
        let original = editing.get_untracked();
        spawn_local(async move {
            let outcome = match original {
                None => {
                    MutationDispatcher::new("Course created")
                        .submit(NewCourse { course_name: name.trim().to_string() }, |c| {
                            let api = api.clone();
                            async move { api.create_course(c).await }
                        }, || list.refetch())
                        .await
                }
                Some(course) => {
                    let edits = vec![("courseName", FieldValue::text(name.trim()))];
                    let changes = match edited_fields(&course, edits) {
                        Ok(changes) => changes,
                        Err(none) => {
                            ctx.toaster.info(none.to_string());
                            return;
                        }
                    };
                    MutationDispatcher::new("Course updated")
                        .send(changes, |c| {
                            let api = api.clone();
                            async move { api.update_course(&course.id, c).await }
                        }, || list.refetch())
                        .await
                }
            };
            if announce(ctx, &outcome) {
                reset_form();
                if let Err(err) = refresh_catalog(catalog, api).await {
                    log::warn!("[courses] catalog refresh failed: {}", err);
                }
            }
        });
    };

    view! {
        <section class="page courses-page">
            <h2>"Courses"</h2>

            <div class="filter-bar">
                <TextField value=name_filter placeholder="Search course name..." />
                <StatusSelect value=status_filter />
                <ResetButton on_reset=move |_| {
                    name_filter.set(String::new());
                    status_filter.set(StatusFilter::All);
                } />
            </div>

            <form class="entity-form" on:submit=submit>
                <TextField value=course_name placeholder="Course name" />
                <button type="submit" class="primary">
                    {move || if editing.with(|e| e.is_some()) { "Save" } else { "Create" }}
                </button>
                <Show when=move || editing.with(|e| e.is_some())>
                    <button type="button" class="cancel-btn" on:click=move |_| reset_form()>
                        "Cancel"
                    </button>
                </Show>
            </form>

            <table class="entity-table">
                <thead>
                    <tr>
                        <th>"Course"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        list.items()
                            .into_iter()
                            .map(|course| {
                                let id = course.id.clone();
                                let active = course.is_active;
                                let row = course.clone();
                                view! {
                                    <tr>
                                        <td>{course.course_name.clone()}</td>
                                        <td>
                                            <StatusToggleButton
                                                active=active
                                                on_confirm=move |_| {
                                                    let id = id.clone();
                                                    let api = ctx.api();
                                                    flip_status(ctx, list, move || async move {
                                                        api.set_course_status(&id, !active).await
                                                    });
                                                }
                                            />
                                        </td>
                                        <td>
                                            <button class="edit-btn" on:click=move |_| start_edit(row.clone())>
                                                "Edit"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <Show when=move || list.state.with(|s| s.is_settled_empty())>
                <p class="empty">{move || list.state.with(|s| s.notice_or("No courses match these filters."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}
