//! Navigation Bar Component
//!
//! Brand, the links of the signed-in portal and the sign-in/out controls.

use leptos::prelude::*;

use crate::context::{use_app, Route};
use crate::models::Role;

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app();

    let links = move || match ctx.role() {
        Some(Role::Admin) => Route::ADMIN_NAV.to_vec(),
        Some(Role::Student) => Route::STUDENT_NAV.to_vec(),
        None => vec![Route::Home],
    };

    view! {
        <nav class="nav-bar">
            <span class="nav-brand" on:click=move |_| ctx.navigate(Route::Home)>
                "StudySwap"
            </span>
            <div class="nav-links">
                {move || {
                    let current = ctx.route();
                    links()
                        .into_iter()
                        .map(|route| {
                            let class = if route == current { "nav-link active" } else { "nav-link" };
                            view! {
                                <button class=class on:click=move |_| ctx.navigate(route)>
                                    {route.title()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="nav-session">
                {move || match ctx.session.get() {
                    Some(session) => view! {
                        <span class="nav-user">{session.user.name}</span>
                        <button class="nav-link" on:click=move |_| ctx.sign_out()>
                            "Sign out"
                        </button>
                    }
                    .into_any(),
                    None => view! {
                        <button class="nav-link" on:click=move |_| ctx.navigate(Route::Login)>
                            "Sign in"
                        </button>
                        <button class="nav-link primary" on:click=move |_| ctx.navigate(Route::Register)>
                            "Register"
                        </button>
                    }
                    .into_any(),
                }}
            </div>
        </nav>
    }
}
