//! Status Toggle Button Component
//!
//! Inline activate/deactivate button that asks for confirmation first.

use leptos::prelude::*;

/// Shows the current status as a button. Clicking asks "Deactivate?" (or
/// "Activate?") with ✓/✗; only ✓ runs `on_confirm`.
#[component]
pub fn StatusToggleButton(
    active: bool,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);
    let (label, question, class) = if active {
        ("Active", "Deactivate?", "status-btn active")
    } else {
        ("Inactive", "Activate?", "status-btn inactive")
    };

    view! {
        <Show when=move || !confirming.get()>
            <button
                class=class
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirming.set(true);
                }
            >
                {label}
            </button>
        </Show>
        <Show when=move || confirming.get()>
            <span class="status-confirm">
                <span class="status-confirm-text">{question}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
