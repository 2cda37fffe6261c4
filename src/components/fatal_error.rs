//! Full-page error with a manual reload. Used when an external resource the
//! page cannot work without is unavailable.

use leptos::prelude::*;

fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().reload() {
            log::error!("[app] reload failed: {:?}", err);
        }
    }
}

/// Lines of the in-memory log shown under the error
const DIAGNOSTIC_LINES: usize = 12;

fn recent_log_text() -> String {
    let lines = rolling_logger::recent();
    let skip = lines.len().saturating_sub(DIAGNOSTIC_LINES);
    lines
        .into_iter()
        .skip(skip)
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[component]
pub fn FatalError(#[prop(into)] message: String) -> impl IntoView {
    let diagnostics = recent_log_text();

    view! {
        <div class="fatal-error">
            <h2>"Something went wrong"</h2>
            <p>{message}</p>
            <button class="primary" on:click=move |_| reload_page()>
                "Reload page"
            </button>
            {(!diagnostics.is_empty()).then(|| view! {
                <details class="diagnostics">
                    <summary>"Details"</summary>
                    <pre>{diagnostics}</pre>
                </details>
            })}
        </div>
    }
}
