use async_trait::async_trait;

use super::SpotifyClient;
use crate::{
    catalog::CatalogMutation,
    error::CatalogError,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, UserProfile,
    },
};

#[async_trait]
impl CatalogMutation for SpotifyClient {
    async fn current_user_id(&self) -> Result<String, CatalogError> {
        let profile: UserProfile = self.send_json(self.http.get(self.url("/me"))).await?;
        Ok(profile.id)
    }

    async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<String, CatalogError> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
            collaborative: false,
        };
        let url = self.url(&format!(
            "/users/{}/playlists",
            urlencoding::encode(owner_id)
        ));

        let created: CreatePlaylistResponse =
            self.send_json(self.http.post(url).json(&body)).await?;
        Ok(created.id)
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let url = self.url(&format!(
            "/playlists/{}/tracks",
            urlencoding::encode(playlist_id)
        ));

        let _: AddTrackToPlaylistResponse =
            self.send_json(self.http.post(url).json(&body)).await?;
        Ok(())
    }
}
