//! Form Field Components
//!
//! Inputs shared by filter bars and edit forms. Each writes straight into the
//! signal it is given.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::FileUpload;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::api::StatusFilter;
use crate::context::use_app;
use crate::error::AppResult;
use crate::models::RequestStatus;

#[component]
pub fn TextField(
    value: RwSignal<String>,
    #[prop(into)] placeholder: String,
    #[prop(optional, into)] input_type: Option<String>,
) -> impl IntoView {
    view! {
        <input
            type=input_type.unwrap_or_else(|| "text".to_string())
            class="text-field"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}

#[component]
pub fn TextArea(value: RwSignal<String>, #[prop(into)] placeholder: String) -> impl IntoView {
    view! {
        <textarea
            class="text-area"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}

#[component]
pub fn StatusSelect(value: RwSignal<StatusFilter>) -> impl IntoView {
    view! {
        <select
            class="status-select"
            on:change=move |ev| value.set(StatusFilter::parse(&event_target_value(&ev)))
        >
            {StatusFilter::OPTIONS
                .iter()
                .map(|(status, label)| {
                    let status = *status;
                    view! {
                        <option value=status.value() prop:selected=move || value.get() == status>
                            {*label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

/// `<select>` over request statuses; empty means any
#[component]
pub fn RequestStatusSelect(value: RwSignal<Option<RequestStatus>>) -> impl IntoView {
    view! {
        <select
            class="status-select"
            on:change=move |ev| value.set(RequestStatus::parse(&event_target_value(&ev)))
        >
            <option value="" prop:selected=move || value.get().is_none()>"Any status"</option>
            {RequestStatus::ALL
                .into_iter()
                .map(|status| {
                    view! {
                        <option value=status.as_str() prop:selected=move || value.get() == Some(status)>
                            {status.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

/// Dropdown over `(id, label)` pairs; the empty option means "none".
///
/// With `on_pick` the choice goes to the callback instead of `value`.
#[component]
pub fn OptionSelect(
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] placeholder: String,
    #[prop(optional, into)] on_pick: Option<Callback<String>>,
) -> impl IntoView {
    let pick = move |picked: String| match on_pick {
        Some(on_pick) => on_pick.run(picked),
        None => value.set(picked),
    };
    view! {
        <select class="option-select" on:change=move |ev| pick(event_target_value(&ev))>
            <option value="" prop:selected=move || value.get().is_empty()>
                {placeholder}
            </option>
            <For
                each=move || options.get()
                key=|(id, _)| id.clone()
                children=move |(id, label)| {
                    let selected_id = id.clone();
                    view! {
                        <option value=id prop:selected=move || value.get() == selected_id>
                            {label}
                        </option>
                    }
                }
            />
        </select>
    }
}

/// Puts a filter bar back to its defaults
#[component]
pub fn ResetButton(#[prop(into)] on_reset: Callback<()>) -> impl IntoView {
    view! {
        <button type="button" class="reset-btn" on:click=move |_| on_reset.run(())>
            "Reset"
        </button>
    }
}

/// Read a picked file into memory
pub async fn read_file(file: web_sys::File) -> AppResult<FileUpload> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(FileUpload {
        name: file.name(),
        mime: file.type_(),
        bytes,
    })
}

/// File input that loads the chosen file into `value`
#[component]
pub fn FilePicker(
    value: RwSignal<Option<FileUpload>>,
    #[prop(into)] accept: String,
) -> impl IntoView {
    let ctx = use_app();

    let on_change = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        match file {
            None => value.set(None),
            Some(file) => spawn_local(async move {
                match read_file(file).await {
                    Ok(upload) => {
                        log::debug!("[form] picked {} ({} bytes)", upload.name, upload.bytes.len());
                        value.set(Some(upload));
                    }
                    Err(err) => ctx.report(&err),
                }
            }),
        }
    };

    view! {
        <span class="file-picker">
            <input type="file" accept=accept on:change=on_change />
            {move || value.with(|v| v.as_ref().map(|f| f.name.clone()))
                .map(|name| view! { <span class="file-name">{name}</span> })}
        </span>
    }
}
