//! Playlist Endpoints

use leptos_listkit::{require, QueryParams, Validate, ValidationError};
use serde::Serialize;

use super::{segment, text_param, ApiClient, ApiMessage, EndpointSource};
use crate::error::AppResult;
use crate::models::Playlist;

pub const PLAYLISTS: &str = "/playlists";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistFilter {
    pub name: String,
}

impl QueryParams for PlaylistFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        text_param(&mut pairs, "name", &self.name);
        pairs
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPlaylist {
    pub name: String,
}

impl Validate for NewPlaylist {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&[("Playlist name", self.name.as_str())])
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MaterialRef<'a> {
    material_id: &'a str,
}

impl ApiClient {
    pub fn playlists(&self) -> EndpointSource<PlaylistFilter, Playlist> {
        self.source(PLAYLISTS)
    }

    /// All playlists of the student, for "add to playlist" pickers
    pub async fn all_playlists(&self) -> AppResult<Vec<Playlist>> {
        self.get(&format!("{}/all", PLAYLISTS), &[]).await
    }

    pub async fn create_playlist(&self, playlist: NewPlaylist) -> AppResult<ApiMessage> {
        self.post(PLAYLISTS, &playlist).await
    }

    pub async fn delete_playlist(&self, id: &str) -> AppResult<ApiMessage> {
        self.delete(&format!("{}/{}", PLAYLISTS, segment(id))).await
    }

    pub async fn add_to_playlist(&self, playlist_id: &str, material_id: &str) -> AppResult<ApiMessage> {
        self.post(
            &format!("{}/{}/materials", PLAYLISTS, segment(playlist_id)),
            &MaterialRef { material_id },
        )
        .await
    }

    pub async fn remove_from_playlist(&self, playlist_id: &str, material_id: &str) -> AppResult<ApiMessage> {
        self.delete(&format!(
            "{}/{}/materials/{}",
            PLAYLISTS,
            segment(playlist_id),
            segment(material_id)
        ))
        .await
    }
}
