//! Toast Notifications
//!
//! Non-blocking notices stacked in a corner, each removed after the
//! configured lifetime or when clicked.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::checkout::NoticeLevel;
use crate::context::use_app;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: NoticeLevel,
    pub text: String,
}

/// Toast queue handle, stored in `AppContext`
#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    lifetime_ms: u32,
}

impl Toaster {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
            lifetime_ms: u32::try_from(lifetime.as_millis()).unwrap_or(u32::MAX),
        }
    }

    pub fn push(&self, level: NoticeLevel, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            return;
        }
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|t| t.push(Toast { id, level, text }));

        let toaster = *self;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(toaster.lifetime_ms).await;
            toaster.dismiss(id);
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Info, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.try_update(|t| t.retain(|toast| toast.id != id));
    }
}

fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "toast success",
        NoticeLevel::Info => "toast info",
        NoticeLevel::Error => "toast error",
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_app().toaster;

    view! {
        <div class="toast-host" role="status">
            <For
                each=move || toaster.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=level_class(toast.level) on:click=move |_| toaster.dismiss(id)>
                            {toast.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
