//! Browse Page (student)
//!
//! The material catalogue with buy and add-to-playlist actions. Buying creates
//! a payment order on the server, parks it in session storage and hands over
//! to the checkout page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::{use_debounced, use_paginated_list, MutationDispatcher};

use crate::api::MaterialFilter;
use crate::components::{MaterialCard, OptionSelect, PaginationBar, ResetButton, TextField};
use crate::context::{use_app, AppContext, Route};
use crate::error::AppResult;
use crate::models::{Material, Playlist};
use crate::pages::{announce, fetch_reporter};
use crate::session::browser_session;
use crate::store::{course_options, material_type_options, subject_options, use_catalog};

/// What the primary button of a card does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardAction {
    OpenLibrary,
    Download,
    Buy,
}

fn card_action(material: &Material) -> CardAction {
    if material.purchased {
        CardAction::OpenLibrary
    } else if material.is_free() && material.file_url.is_some() {
        CardAction::Download
    } else {
        CardAction::Buy
    }
}

/// Filter bar state; the subject choices depend on the course picked
#[derive(Clone, Copy)]
struct BrowseFilters {
    title: RwSignal<String>,
    course: RwSignal<String>,
    subject: RwSignal<String>,
    material_type: RwSignal<String>,
    free_only: RwSignal<bool>,
}

impl BrowseFilters {
    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            course: RwSignal::new(String::new()),
            subject: RwSignal::new(String::new()),
            material_type: RwSignal::new(String::new()),
            free_only: RwSignal::new(false),
        }
    }

    /// A different course drops the subject picked under the old one
    fn pick_course(&self, course: String) {
        if self.course.with_untracked(|c| *c != course) {
            self.subject.set(String::new());
            self.course.set(course);
        }
    }

    fn reset(&self) {
        self.title.set(String::new());
        self.course.set(String::new());
        self.subject.set(String::new());
        self.material_type.set(String::new());
        self.free_only.set(false);
    }

    fn to_filter(&self) -> MaterialFilter {
        MaterialFilter {
            title: self.title.get(),
            subject: self.subject.get(),
            material_type: self.material_type.get(),
            free_only: self.free_only.get(),
            ..Default::default()
        }
    }
}

async fn start_purchase(ctx: AppContext, material_id: String) -> AppResult<()> {
    let order = ctx.api().create_payment_order(&material_id).await?;
    log::info!("[browse] order {} for {}", order.order_id, order.material_title);
    browser_session().save_order(&order)?;
    ctx.navigate(Route::Checkout);
    Ok(())
}

async fn load_playlists(ctx: AppContext, into: RwSignal<Vec<Playlist>>) {
    match ctx.api().all_playlists().await {
        Ok(playlists) => into.set(playlists),
        Err(err) => {
            log::warn!("[browse] playlists unavailable: {}", err);
            ctx.report(&err);
        }
    }
}

#[component]
pub fn BrowsePage() -> impl IntoView {
    let ctx = use_app();
    let catalog = use_catalog();
    let config = ctx.config();

    let filters = BrowseFilters::new();

    let courses = course_options(catalog);
    let subjects = subject_options(catalog, filters.course.into());
    let types = material_type_options(catalog);

    let raw = Signal::derive(move || filters.to_filter());
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().material_catalogue(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    let playlists = RwSignal::new(Vec::<Playlist>::new());
    spawn_local(load_playlists(ctx, playlists));

    // Material whose order is being created; blocks a second click
    let buying = RwSignal::new(None::<String>);
    let buy = move |material_id: String| {
        if buying.with_untracked(|b| b.is_some()) {
            return;
        }
        buying.set(Some(material_id.clone()));
        spawn_local(async move {
            if let Err(err) = start_purchase(ctx, material_id).await {
                ctx.report(&err);
            }
            buying.set(None);
        });
    };

    let add_to_playlist = move |playlist_id: String, material_id: String| {
        if playlist_id.is_empty() {
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            let outcome = MutationDispatcher::new("Added to playlist")
                .send(
                    (),
                    |_| async move { api.add_to_playlist(&playlist_id, &material_id).await },
                    || spawn_local(load_playlists(ctx, playlists)),
                )
                .await;
            announce(ctx, &outcome);
        });
    };

    view! {
        <section class="page browse-page">
            <h2>"Browse materials"</h2>

            <div class="filter-bar">
                <TextField value=filters.title placeholder="Search title..." />
                <OptionSelect
                    value=filters.course
                    options=courses
                    placeholder="All courses"
                    on_pick=move |course: String| filters.pick_course(course)
                />
                <OptionSelect value=filters.subject options=subjects placeholder="All subjects" />
                <OptionSelect value=filters.material_type options=types placeholder="All types" />
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || filters.free_only.get()
                        on:change=move |ev| filters.free_only.set(event_target_checked(&ev))
                    />
                    " Free only"
                </label>
                <ResetButton on_reset=move |_| filters.reset() />
            </div>

            <div class="material-grid">
                {move || {
                    list.items()
                        .into_iter()
                        .map(|material| {
                            let id = material.id.clone();
                            let playlist_target = material.id.clone();
                            let action = card_action(&material);
                            let busy_id = material.id.clone();
                            let file_url = material.file_url.clone().unwrap_or_default();
                            view! {
                                <MaterialCard material=material>
                                    {match action {
                                        CardAction::OpenLibrary => view! {
                                            <button class="secondary" on:click=move |_| ctx.navigate(Route::StudentLibrary)>
                                                "Open in library"
                                            </button>
                                        }
                                        .into_any(),
                                        CardAction::Download => view! {
                                            <a class="secondary" href=file_url target="_blank" rel="noopener">
                                                "Download"
                                            </a>
                                        }
                                        .into_any(),
                                        CardAction::Buy => view! {
                                            <button
                                                class="primary"
                                                disabled=move || buying.with(|b| b.as_deref() == Some(busy_id.as_str()))
                                                on:click=move |_| buy(id.clone())
                                            >
                                                "Buy"
                                            </button>
                                        }
                                        .into_any(),
                                    }}
                                    <select
                                        class="playlist-picker"
                                        on:change=move |ev| {
                                            add_to_playlist(event_target_value(&ev), playlist_target.clone());
                                        }
                                    >
                                        <option value="" selected=true>"Add to playlist..."</option>
                                        {move || {
                                            playlists
                                                .get()
                                                .into_iter()
                                                .map(|p| view! { <option value=p.id>{p.name}</option> })
                                                .collect_view()
                                        }}
                                    </select>
                                </MaterialCard>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <Show when=move || list.state.with(|s| s.is_settled_empty())>
                <p class="empty">{move || list.state.with(|s| s.notice_or("No materials match these filters."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}
