//! Playlists Page (student)
//!
//! Named collections of materials. Materials are added from the browse page;
//! here they can be removed, and whole playlists deleted.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::{use_debounced, use_paginated_list, MutationDispatcher};

use crate::api::{NewPlaylist, PlaylistFilter};
use crate::components::{DeleteConfirmButton, PaginationBar, TextField};
use crate::context::use_app;
use crate::models::{format_price, Playlist};
use crate::pages::{announce, fetch_reporter};

fn playlist_summary(playlist: &Playlist) -> String {
    match playlist.materials.len() {
        0 => "Empty".to_string(),
        1 => "1 material".to_string(),
        n => format!("{} materials", n),
    }
}

#[component]
pub fn PlaylistsPage() -> impl IntoView {
    let ctx = use_app();
    let config = ctx.config();

    let name_filter = RwSignal::new(String::new());
    let raw = Signal::derive(move || PlaylistFilter { name: name_filter.get() });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().playlists(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    let new_name = RwSignal::new(String::new());
    let create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.api();
        let playlist = NewPlaylist {
            name: new_name.get_untracked().trim().to_string(),
        };
        spawn_local(async move {
            let outcome = MutationDispatcher::new("Playlist created")
                .submit(
                    playlist,
                    |p| async move { api.create_playlist(p).await },
                    || list.refetch(),
                )
                .await;
            if announce(ctx, &outcome) {
                new_name.set(String::new());
            }
        });
    };

    let delete_playlist = move |id: String| {
        let api = ctx.api();
        spawn_local(async move {
            let outcome = MutationDispatcher::new("Playlist deleted")
                .send((), |_| async move { api.delete_playlist(&id).await }, || list.refetch())
                .await;
            announce(ctx, &outcome);
        });
    };

    let remove_material = move |playlist_id: String, material_id: String| {
        let api = ctx.api();
        spawn_local(async move {
            let outcome = MutationDispatcher::new("Removed from playlist")
                .send(
                    (),
                    |_| async move { api.remove_from_playlist(&playlist_id, &material_id).await },
                    || list.refetch(),
                )
                .await;
            announce(ctx, &outcome);
        });
    };

    view! {
        <section class="page playlists-page">
            <h2>"Playlists"</h2>

            <div class="filter-bar">
                <TextField value=name_filter placeholder="Search playlists..." />
            </div>

            <form class="entity-form" on:submit=create>
                <TextField value=new_name placeholder="New playlist name" />
                <button type="submit" class="primary">"Create"</button>
            </form>

            <div class="playlist-list">
                {move || {
                    list.items()
                        .into_iter()
                        .map(|playlist| {
                            let summary = playlist_summary(&playlist);
                            let playlist_id = playlist.id.clone();
                            let owner_id = playlist.id.clone();
                            view! {
                                <article class="playlist">
                                    <header class="playlist-header">
                                        <h3>{playlist.name.clone()}</h3>
                                        <span class="muted">{summary}</span>
                                        <DeleteConfirmButton
                                            label="Delete"
                                            question="Delete playlist?"
                                            on_confirm=move |_| delete_playlist(playlist_id.clone())
                                        />
                                    </header>
                                    <ul class="playlist-materials">
                                        {playlist
                                            .materials
                                            .into_iter()
                                            .map(|material| {
                                                let owner = owner_id.clone();
                                                let material_id = material.id.clone();
                                                view! {
                                                    <li>
                                                        <span class="title">{material.title}</span>
                                                        <span class="price">{format_price(material.price)}</span>
                                                        <DeleteConfirmButton
                                                            label="Remove"
                                                            question="Remove?"
                                                            on_confirm=move |_| {
                                                                remove_material(owner.clone(), material_id.clone())
                                                            }
                                                        />
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                </article>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <Show when=move || list.state.with(|s| s.is_settled_empty())>
                <p class="empty">{move || list.state.with(|s| s.notice_or("No playlists yet."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_summary() {
        let empty = Playlist {
            id: "p1".into(),
            name: "Exam prep".into(),
            materials: Vec::new(),
        };
        assert_eq!(playlist_summary(&empty), "Empty");
    }
}
