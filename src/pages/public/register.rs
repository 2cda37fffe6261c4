//! Student Registration Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::MutationDispatcher;

use crate::api::Registration;
use crate::components::TextField;
use crate::context::{use_app, Route};
use crate::pages::announce;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_app();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let registration = Registration {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            phone: phone.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            confirm_password: confirm.get_untracked(),
        };
        let api = ctx.api();
        spawn_local(async move {
            let outcome = MutationDispatcher::new("Account created. Please sign in.")
                .submit(
                    registration,
                    |r| async move { api.register(r).await },
                    || {},
                )
                .await;
            if announce(ctx, &outcome) {
                password.set(String::new());
                confirm.set(String::new());
                ctx.navigate(Route::Login);
            }
        });
    };

    view! {
        <section class="page auth-page">
            <h2>"Create a student account"</h2>
            <form class="auth-form" on:submit=submit>
                <TextField value=name placeholder="Full name" />
                <TextField value=email placeholder="Email" input_type="email" />
                <TextField value=phone placeholder="Phone (optional)" input_type="tel" />
                <TextField value=password placeholder="Password" input_type="password" />
                <TextField value=confirm placeholder="Confirm password" input_type="password" />
                <button type="submit" class="primary">"Register"</button>
            </form>
            <p class="auth-switch">
                "Already registered? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    ctx.navigate(Route::Login);
                }>
                    "Sign in"
                </a>
            </p>
        </section>
    }
}
