//! Home Page
//!
//! Active course catalogue and a browser over the public material catalogue.
//! Buying needs a student session; the button sends visitors to sign in.

use leptos::prelude::*;
use leptos_listkit::{use_debounced, use_paginated_list};

use crate::api::MaterialFilter;
use crate::components::{MaterialCard, PaginationBar, TextField};
use crate::context::{use_app, Route};
use crate::models::Role;
use crate::pages::fetch_reporter;
use crate::store::{course_options, use_catalog};

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app();
    let catalog = use_catalog();
    let config = ctx.config();
    let courses = course_options(catalog);

    let title_filter = RwSignal::new(String::new());
    let raw = Signal::derive(move || MaterialFilter {
        title: title_filter.get(),
        ..Default::default()
    });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().material_catalogue(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    let get_started = move || match ctx.role() {
        Some(role) => ctx.navigate(Route::home_for(role)),
        None => ctx.navigate(Route::Login),
    };

    view! {
        <section class="page home-page">
            <header class="hero">
                <h1>"Study materials from students who aced it"</h1>
                <p>"Notes, slides and solved papers for your course, free or for a small price."</p>
            </header>

            <h2>"Courses"</h2>
            <div class="course-chips">
                {move || {
                    courses
                        .get()
                        .into_iter()
                        .map(|(_, name)| view! { <span class="chip">{name}</span> })
                        .collect_view()
                }}
            </div>

            <h2>"Browse materials"</h2>
            <div class="filter-bar">
                <TextField value=title_filter placeholder="Search title..." />
            </div>
            <div class="material-grid">
                {move || {
                    list.items()
                        .into_iter()
                        .map(|material| {
                            let label = match ctx.role() {
                                Some(Role::Student) => "View",
                                Some(Role::Admin) => "Manage",
                                None => "Sign in to get",
                            };
                            view! {
                                <MaterialCard material=material>
                                    <button class="primary" on:click=move |_| get_started()>
                                        {label}
                                    </button>
                                </MaterialCard>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <Show when=move || list.state.with(|s| s.is_settled_empty())>
                <p class="empty">{move || list.state.with(|s| s.notice_or("No materials found."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}
