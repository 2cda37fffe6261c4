//! Subjects Page (admin)
//!
//! Subjects carry a cover image; an edit sends the new image only when one
//! was picked.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::{use_debounced, use_paginated_list, FieldValue, FileUpload, MutationDispatcher};

use crate::api::{NewSubject, StatusFilter, SubjectFilter};
use crate::components::{
    FilePicker, OptionSelect, PaginationBar, ResetButton, StatusSelect, StatusToggleButton, TextField,
};
use crate::context::use_app;
use crate::models::Subject;
use crate::pages::{announce, edited_fields, fetch_reporter, flip_status};
use crate::store::{course_options, refresh_catalog, use_catalog};

#[component]
pub fn SubjectsPage() -> impl IntoView {
    let ctx = use_app();
    let catalog = use_catalog();
    let config = ctx.config();
    let courses = course_options(catalog);

    let name_filter = RwSignal::new(String::new());
    let course_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(StatusFilter::All);
    let raw = Signal::derive(move || SubjectFilter {
        subject_name: name_filter.get(),
        course: course_filter.get(),
        status: status_filter.get(),
    });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().subjects(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    let editing = RwSignal::new(None::<Subject>);
    let subject_name = RwSignal::new(String::new());
    let course = RwSignal::new(String::new());
    let image = RwSignal::new(None::<FileUpload>);
    let reset_form = move || {
        editing.set(None);
        subject_name.set(String::new());
        course.set(String::new());
        image.set(None);
    };
    let start_edit = move |subject: Subject| {
        subject_name.set(subject.subject_name.clone());
        course.set(subject.course.id.clone());
        image.set(None);
        editing.set(Some(subject));
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.api();
        let name = subject_name.get_untracked().trim().to_string();
        let course_id = course.get_untracked();
        let picked = image.get_untracked();
        let original = editing.get_untracked();
        spawn_local(async move {
            let outcome = match original {
                None => {
                    let payload = NewSubject {
                        subject_name: name,
                        course: course_id,
                        image: picked,
                    };
                    MutationDispatcher::new("Subject created")
                        .submit(
                            payload,
                            |s| {
                                let api = api.clone();
                                async move { api.create_subject(s).await }
                            },
                            || list.refetch(),
                        )
                        .await
                }
                Some(original) => {
                    if name.is_empty() || course_id.is_empty() {
                        return ctx.toaster.error("Subject name and course are required");
                    }
                    let mut edits = vec![
                        ("subjectName", FieldValue::text(name)),
                        ("course", FieldValue::text(course_id)),
                    ];
                    if let Some(file) = picked {
                        edits.push(("image", FieldValue::File(file)));
                    }
                    let changes = match edited_fields(&original, edits) {
                        Ok(changes) => changes,
                        Err(none) => return ctx.toaster.info(none.to_string()),
                    };
                    MutationDispatcher::new("Subject updated")
                        .send(
                            changes,
                            |c| {
                                let api = api.clone();
                                async move { api.update_subject(&original.id, c).await }
                            },
                            || list.refetch(),
                        )
                        .await
                }
            };
            if announce(ctx, &outcome) {
                reset_form();
                if let Err(err) = refresh_catalog(catalog, api).await {
                    log::warn!("[subjects] catalog refresh failed: {}", err);
                }
            }
        });
    };

    view! {
        <section class="page subjects-page">
            <h2>"Subjects"</h2>

            <div class="filter-bar">
                <TextField value=name_filter placeholder="Search subject name..." />
                <OptionSelect value=course_filter options=courses placeholder="All courses" />
                <StatusSelect value=status_filter />
                <ResetButton on_reset=move |_| {
                    name_filter.set(String::new());
                    course_filter.set(String::new());
                    status_filter.set(StatusFilter::All);
                } />
            </div>

            <form class="entity-form" on:submit=submit>
                <TextField value=subject_name placeholder="Subject name" />
                <OptionSelect value=course options=courses placeholder="Select course" />
                <FilePicker value=image accept="image/*" />
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
                        <th></th>
                        <th>"Subject"</th>
                        <th>"Course"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        list.items()
                            .into_iter()
                            .map(|subject| {
                                let id = subject.id.clone();
                                let active = subject.is_active;
                                let row = subject.clone();
                                view! {
                                    <tr>
                                        <td>
                                            {subject.image.clone().map(|src| view! {
                                                <img class="thumb" src=src alt="" />
                                            })}
                                        </td>
                                        <td>{subject.subject_name.clone()}</td>
                                        <td>{subject.course.course_name.clone()}</td>
                                        <td>
                                            <StatusToggleButton
                                                active=active
                                                on_confirm=move |_| {
                                                    let id = id.clone();
                                                    let api = ctx.api();
                                                    flip_status(ctx, list, move || async move {
                                                        api.set_subject_status(&id, !active).await
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
                <p class="empty">{move || list.state.with(|s| s.notice_or("No subjects match these filters."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}
