//! Material Types Page (admin)

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::{use_debounced, use_paginated_list, FieldValue, MutationDispatcher};

use crate::api::{MaterialTypeFilter, NewMaterialType, StatusFilter};
use crate::components::{PaginationBar, ResetButton, StatusSelect, StatusToggleButton, TextField};
use crate::context::use_app;
use crate::models::MaterialType;
use crate::pages::{announce, edited_fields, fetch_reporter, flip_status};
use crate::store::{refresh_catalog, use_catalog};

#[component]
pub fn MaterialTypesPage() -> impl IntoView {
    let ctx = use_app();
    let catalog = use_catalog();
    let config = ctx.config();

    let type_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(StatusFilter::All);
    let raw = Signal::derive(move || MaterialTypeFilter {
        type_name: type_filter.get(),
        status: status_filter.get(),
    });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().material_types(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    let editing = RwSignal::new(None::<MaterialType>);
    let type_name = RwSignal::new(String::new());
    let reset_form = move || {
        editing.set(None);
        type_name.set(String::new());
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.api();
        let name = type_name.get_untracked().trim().to_string();
        let original = editing.get_untracked();
        spawn_local(async move {
            let outcome = match original {
                None => {
                    let payload = NewMaterialType { type_name: name };
                    MutationDispatcher::new("Material type created")
                        .submit(
                            payload,
                            |t| {
                                let api = api.clone();
                                async move { api.create_material_type(t).await }
                            },
                            || list.refetch(),
                        )
                        .await
                }
                Some(original) => {
                    let changes = match edited_fields(&original, vec![("typeName", FieldValue::text(name))]) {
                        Ok(changes) => changes,
                        Err(none) => return ctx.toaster.info(none.to_string()),
                    };
                    MutationDispatcher::new("Material type updated")
                        .send(
                            changes,
                            |c| {
                                let api = api.clone();
                                async move { api.update_material_type(&original.id, c).await }
                            },
                            || list.refetch(),
                        )
                        .await
                }
            };
            if announce(ctx, &outcome) {
                reset_form();
                if let Err(err) = refresh_catalog(catalog, api).await {
                    log::warn!("[material-types] catalog refresh failed: {}", err);
                }
            }
        });
    };

    view! {
        <section class="page material-types-page">
            <h2>"Material types"</h2>

            <div class="filter-bar">
                <TextField value=type_filter placeholder="Search type name..." />
                <StatusSelect value=status_filter />
                <ResetButton on_reset=move |_| {
                    type_filter.set(String::new());
                    status_filter.set(StatusFilter::All);
                } />
            </div>

            <form class="entity-form" on:submit=submit>
                <TextField value=type_name placeholder="Type name (e.g. Notes, Slides)" />
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
                        <th>"Type"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        list.items()
                            .into_iter()
                            .map(|material_type| {
                                let id = material_type.id.clone();
                                let active = material_type.is_active;
                                let name = material_type.type_name.clone();
                                view! {
                                    <tr>
                                        <td>{name}</td>
                                        <td>
                                            <StatusToggleButton
                                                active=active
                                                on_confirm=move |_| {
                                                    let id = id.clone();
                                                    let api = ctx.api();
                                                    flip_status(ctx, list, move || async move {
                                                        api.set_material_type_status(&id, !active).await
                                                    });
                                                }
                                            />
                                        </td>
                                        <td>
                                            <button
                                                class="edit-btn"
                                                on:click=move |_| {
                                                    type_name.set(material_type.type_name.clone());
                                                    editing.set(Some(material_type.clone()));
                                                }
                                            >
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
                <p class="empty">{move || list.state.with(|s| s.notice_or("No material types match these filters."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}
