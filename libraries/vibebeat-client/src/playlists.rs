//! Playlist operations.

use crate::client::{parse_json, VibeClient};
use crate::error::Result;
use crate::types::{AddSongRequest, PlaylistInput, PlaylistsResponse};
use tracing::{debug, info};
use vibebeat_core::{Playlist, PlaylistId};

/// Playlist client for the VibeBeat backend.
///
/// Mutations only report success or failure; callers re-fetch the full list
/// afterwards instead of trusting response bodies.
pub struct PlaylistsClient<'a> {
    client: &'a VibeClient,
}

impl<'a> PlaylistsClient<'a> {
    pub(crate) fn new(client: &'a VibeClient) -> Self {
        Self { client }
    }

    /// List all playlists (`GET /playlists`).
    pub async fn list(&self) -> Result<Vec<Playlist>> {
        let url = self.client.endpoint("/playlists");
        debug!(url = %url, "Fetching playlists");

        let response = self.client.send_idempotent(|http| http.get(&url)).await?;
        let body: PlaylistsResponse = parse_json(response, "playlists").await?;
        Ok(body.playlists)
    }

    /// Create a playlist (`POST /playlists`).
    ///
    /// Returns the new id when the backend echoes it back.
    pub async fn create(&self, name: &str, description: &str) -> Result<Option<PlaylistId>> {
        let url = self.client.endpoint("/playlists");
        let body = PlaylistInput {
            name: name.to_string(),
            description: description.to_string(),
        };

        let response = self
            .client
            .send_once(self.client.http().post(&url).json(&body))
            .await?;

        let id = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .as_ref()
            .and_then(created_id);

        info!(name = %name, id = ?id, "Playlist created");
        Ok(id)
    }

    /// Replace a playlist's name and description (`PUT /playlists/{id}`).
    pub async fn update(&self, id: PlaylistId, name: &str, description: &str) -> Result<()> {
        let url = self.client.endpoint(&format!("/playlists/{}", id));
        let body = PlaylistInput {
            name: name.to_string(),
            description: description.to_string(),
        };

        self.client
            .send_idempotent(|http| http.put(&url).json(&body))
            .await?;

        info!(id, name = %name, "Playlist updated");
        Ok(())
    }

    /// Delete a playlist (`DELETE /playlists/{id}`).
    pub async fn delete(&self, id: PlaylistId) -> Result<()> {
        let url = self.client.endpoint(&format!("/playlists/{}", id));
        self.client.send_idempotent(|http| http.delete(&url)).await?;

        info!(id, "Playlist deleted");
        Ok(())
    }

    /// Append a song (`POST /playlists/{id}/add`).
    ///
    /// Not idempotent: the same filename may be added more than once.
    pub async fn add_song(&self, id: PlaylistId, filename: &str) -> Result<()> {
        let url = self.client.endpoint(&format!("/playlists/{}/add", id));

        self.client
            .send_once(
                self.client
                    .http()
                    .post(&url)
                    .json(&AddSongRequest { filename }),
            )
            .await?;

        debug!(id, file = %filename, "Song added to playlist");
        Ok(())
    }

    /// Remove a song (`DELETE /playlists/{id}/remove/{filename}`).
    ///
    /// The backend decides whether one or all occurrences are removed.
    pub async fn remove_song(&self, id: PlaylistId, filename: &str) -> Result<()> {
        let url = self.client.endpoint(&format!(
            "/playlists/{}/remove/{}",
            id,
            urlencoding::encode(filename)
        ));

        self.client.send_idempotent(|http| http.delete(&url)).await?;

        debug!(id, file = %filename, "Song removed from playlist");
        Ok(())
    }
}

/// Id from a create response: `{"id": ..}` or `{"playlist": {"id": ..}}`.
fn created_id(body: &serde_json::Value) -> Option<PlaylistId> {
    body.get("id")
        .or_else(|| body.get("playlist").and_then(|p| p.get("id")))
        .and_then(serde_json::Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_id_shapes() {
        assert_eq!(created_id(&json!({"id": 4})), Some(4));
        assert_eq!(created_id(&json!({"playlist": {"id": 9, "name": "x"}})), Some(9));
        assert_eq!(created_id(&json!({"message": "ok"})), None);
    }
}
