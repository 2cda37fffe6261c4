//! Materials Page (admin)

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::{use_debounced, use_paginated_list, FieldValue, FileUpload, MutationDispatcher};

use crate::api::{parse_price, MaterialFilter, NewMaterial, StatusFilter};
use crate::components::{
    FilePicker, OptionSelect, PaginationBar, ResetButton, StatusSelect, StatusToggleButton,
    TextArea, TextField,
};
use crate::context::use_app;
use crate::markdown::excerpt;
use crate::models::{format_price, Material};
use crate::pages::{announce, edited_fields, fetch_reporter, flip_status};
use crate::store::{material_type_options, subject_options, use_catalog};

/// Form values for a material
#[derive(Clone, Copy)]
struct MaterialForm {
    title: RwSignal<String>,
    description: RwSignal<String>,
    subject: RwSignal<String>,
    material_type: RwSignal<String>,
    price: RwSignal<String>,
    file: RwSignal<Option<FileUpload>>,
    thumbnail: RwSignal<Option<FileUpload>>,
}

impl MaterialForm {
    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            subject: RwSignal::new(String::new()),
            material_type: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            file: RwSignal::new(None),
            thumbnail: RwSignal::new(None),
        }
    }

    fn clear(&self) {
        self.fill(None);
    }

    fn fill(&self, material: Option<&Material>) {
        self.title.set(material.map(|m| m.title.clone()).unwrap_or_default());
        self.description
            .set(material.map(|m| m.description.clone()).unwrap_or_default());
        self.subject
            .set(material.map(|m| m.subject.id.clone()).unwrap_or_default());
        self.material_type
            .set(material.map(|m| m.material_type.id.clone()).unwrap_or_default());
        self.price
            .set(material.map(|m| format!("{:.2}", m.price)).unwrap_or_default());
        self.file.set(None);
        self.thumbnail.set(None);
    }

    fn to_new(&self) -> NewMaterial {
        NewMaterial {
            title: self.title.get_untracked(),
            description: self.description.get_untracked(),
            subject: self.subject.get_untracked(),
            material_type: self.material_type.get_untracked(),
            price: self.price.get_untracked(),
            file: self.file.get_untracked(),
            thumbnail: self.thumbnail.get_untracked(),
        }
    }
}

/// Field edits for an existing material; files only when newly picked
fn material_edits(form: &NewMaterial) -> Result<Vec<(&'static str, FieldValue)>, String> {
    let price = parse_price(&form.price).map_err(|e| e.to_string())?;
    if form.title.trim().is_empty() {
        return Err("Title is required".into());
    }
    let mut edits = vec![
        ("title", FieldValue::text(form.title.trim())),
        ("description", FieldValue::text(&form.description)),
        ("subject", FieldValue::text(&form.subject)),
        ("materialType", FieldValue::text(&form.material_type)),
        ("price", FieldValue::Number(price)),
    ];
    if let Some(file) = &form.file {
        edits.push(("file", FieldValue::File(file.clone())));
    }
    if let Some(thumbnail) = &form.thumbnail {
        edits.push(("thumbnail", FieldValue::File(thumbnail.clone())));
    }
    Ok(edits)
}

#[component]
pub fn MaterialsPage() -> impl IntoView {
    let ctx = use_app();
    let catalog = use_catalog();
    let config = ctx.config();
    let types = material_type_options(catalog);
    let all_subjects = subject_options(catalog, Signal::stored(String::new()));

    let title_filter = RwSignal::new(String::new());
    let subject_filter = RwSignal::new(String::new());
    let type_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(StatusFilter::All);
    let raw = Signal::derive(move || MaterialFilter {
        title: title_filter.get(),
        subject: subject_filter.get(),
        material_type: type_filter.get(),
        status: status_filter.get(),
        free_only: false,
    });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().materials(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    let form = MaterialForm::new();
    let editing = RwSignal::new(None::<Material>);
    let reset_form = move || {
        editing.set(None);
        form.clear();
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.api();
        let values = form.to_new();
        let original = editing.get_untracked();
        spawn_local(async move {
            let outcome = match original {
                None => {
                    MutationDispatcher::new("Material created")
                        .submit(
                            values,
                            |m| {
                                let api = api.clone();
                                async move { api.create_material(m).await }
                            },
                            || list.refetch(),
                        )
                        .await
                }
                Some(original) => {
                    let edits = match material_edits(&values) {
                        Ok(edits) => edits,
                        Err(msg) => return ctx.toaster.error(msg),
                    };
                    let changes = match edited_fields(&original, edits) {
                        Ok(changes) => changes,
                        Err(none) => return ctx.toaster.info(none.to_string()),
                    };
                    log::debug!("[materials] updating {} field(s) of {}", changes.len(), original.id);
                    MutationDispatcher::new("Material updated")
                        .send(
                            changes,
                            |c| {
                                let api = api.clone();
                                async move { api.update_material(&original.id, c).await }
                            },
                            || list.refetch(),
                        )
                        .await
                }
            };
            if announce(ctx, &outcome) {
                reset_form();
            }
        });
    };

    view! {
        <section class="page materials-page">
            <h2>"Materials"</h2>

            <div class="filter-bar">
                <TextField value=title_filter placeholder="Search title..." />
                <OptionSelect value=subject_filter options=all_subjects placeholder="All subjects" />
                <OptionSelect value=type_filter options=types placeholder="All types" />
                <StatusSelect value=status_filter />
                <ResetButton on_reset=move |_| {
                    title_filter.set(String::new());
                    subject_filter.set(String::new());
                    type_filter.set(String::new());
                    status_filter.set(StatusFilter::All);
                } />
            </div>

            <form class="entity-form material-form" on:submit=submit>
                <TextField value=form.title placeholder="Title" />
                <TextArea value=form.description placeholder="Description (markdown)" />
                <OptionSelect value=form.subject options=all_subjects placeholder="Select subject" />
                <OptionSelect value=form.material_type options=types placeholder="Select type" />
                <TextField value=form.price placeholder="Price (0 for free)" />
                <label>"File " <FilePicker value=form.file accept=".pdf,.ppt,.pptx,.doc,.docx,.zip" /></label>
                <label>"Thumbnail " <FilePicker value=form.thumbnail accept="image/*" /></label>
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
                        <th>"Title"</th>
                        <th>"Subject"</th>
                        <th>"Type"</th>
                        <th>"Price"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        list.items()
                            .into_iter()
                            .map(|material| {
                                let id = material.id.clone();
                                let active = material.is_active;
                                let row = material.clone();
                                view! {
                                    <tr>
                                        <td>
                                            {material.thumbnail.clone().map(|src| view! {
                                                <img class="thumb" src=src alt="" />
                                            })}
                                        </td>
                                        <td>
                                            <div class="title">{material.title.clone()}</div>
                                            <div class="excerpt">{excerpt(&material.description, 80)}</div>
                                        </td>
                                        <td>{material.subject.subject_name.clone()}</td>
                                        <td>{material.material_type.type_name.clone()}</td>
                                        <td>{format_price(material.price)}</td>
                                        <td>
                                            <StatusToggleButton
                                                active=active
                                                on_confirm=move |_| {
                                                    let id = id.clone();
                                                    let api = ctx.api();
                                                    flip_status(ctx, list, move || async move {
                                                        api.set_material_status(&id, !active).await
                                                    });
                                                }
                                            />
                                        </td>
                                        <td>
                                            <button
                                                class="edit-btn"
                                                on:click=move |_| {
                                                    form.fill(Some(&row));
                                                    editing.set(Some(row.clone()));
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
                <p class="empty">{move || list.state.with(|s| s.notice_or("No materials match these filters."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(price: &str) -> NewMaterial {
        NewMaterial {
            title: " Calculus Notes ".into(),
            description: "Limits".into(),
            subject: "s1".into(),
            material_type: "t1".into(),
            price: price.into(),
            file: None,
            thumbnail: None,
        }
    }

    #[test]
    fn test_edits_without_new_files_skip_file_fields() {
        let edits = material_edits(&values("149")).unwrap();
        let names: Vec<&str> = edits.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["title", "description", "subject", "materialType", "price"]);
        assert_eq!(edits[0].1, FieldValue::text("Calculus Notes"));
        assert_eq!(edits[4].1, FieldValue::Number(149.0));
    }

    #[test]
    fn test_bad_price_rejected_before_diff() {
        assert!(material_edits(&values("-5")).is_err());
        assert!(material_edits(&values("12.345")).is_err());
    }
}
