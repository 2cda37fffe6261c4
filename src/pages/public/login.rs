//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::Validate;

use crate::api::Credentials;
use crate::components::TextField;
use crate::context::{use_app, Route};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let pending = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let credentials = Credentials {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if let Err(err) = credentials.validate() {
            ctx.toaster.error(err.to_string());
            return;
        }
        pending.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.login(credentials).await {
                Ok(session) => {
                    ctx.toaster.success(format!("Welcome back, {}", session.user.name));
                    password.set(String::new());
                    ctx.sign_in(session);
                }
                Err(err) => ctx.report(&err),
            }
            pending.set(false);
        });
    };

    view! {
        <section class="page auth-page">
            <h2>"Sign in"</h2>
            <form class="auth-form" on:submit=submit>
                <TextField value=email placeholder="Email" input_type="email" />
                <TextField value=password placeholder="Password" input_type="password" />
                <button type="submit" class="primary" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="auth-switch">
                "New here? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    ctx.navigate(Route::Register);
                }>
                    "Create an account"
                </a>
            </p>
        </section>
    }
}
