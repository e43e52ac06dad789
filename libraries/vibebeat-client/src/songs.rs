//! Song catalog operations.

use crate::client::{parse_json, VibeClient};
use crate::error::{ClientError, Result};
use crate::types::{LegacyPlaylistEntry, LegacyPlaylistResponse, SongRecord, SongsResponse};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{debug, info};

/// Song client for the VibeBeat backend.
pub struct SongsClient<'a> {
    client: &'a VibeClient,
}

impl<'a> SongsClient<'a> {
    pub(crate) fn new(client: &'a VibeClient) -> Self {
        Self { client }
    }

    /// List every song the backend knows about (`GET /songs`).
    pub async fn list(&self) -> Result<Vec<SongRecord>> {
        let url = self.client.endpoint("/songs");
        debug!(url = %url, "Fetching songs");

        let response = self.client.send_idempotent(|http| http.get(&url)).await?;
        let body: SongsResponse = parse_json(response, "songs").await?;

        debug!(count = body.songs.len(), "Fetched songs");
        Ok(body.songs)
    }

    /// Upload one audio file as a multipart form with field `file`.
    ///
    /// Uploads are never retried.
    pub async fn upload(&self, filename: &str, contents: Vec<u8>) -> Result<()> {
        let size = contents.len();
        let part = Part::bytes(contents)
            .file_name(filename.to_string())
            .mime_str(mime_type_for_file(Path::new(filename)))?;
        let form = Form::new().part("file", part);

        let url = self.client.endpoint("/upload_song/");
        debug!(file = %filename, size, "Uploading song");

        self.client
            .send_once(self.client.http().post(&url).multipart(form))
            .await?;

        info!(file = %filename, size, "Song uploaded");
        Ok(())
    }

    /// Read a file from disk and upload it under its own file name.
    pub async fn upload_file(&self, file_path: &Path) -> Result<String> {
        if !file_path.exists() {
            return Err(ClientError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        let filename = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("song")
            .to_string();

        let contents = tokio::fs::read(file_path).await?;
        self.upload(&filename, contents).await?;

        Ok(filename)
    }

    /// Read the legacy single server-side playlist (`GET /playlist`).
    pub async fn legacy_playlist(&self) -> Result<Vec<LegacyPlaylistEntry>> {
        let url = self.client.endpoint("/playlist");
        let response = self.client.send_idempotent(|http| http.get(&url)).await?;
        let body: LegacyPlaylistResponse = parse_json(response, "legacy playlist").await?;
        Ok(body.playlist)
    }
}

/// Get MIME type for an audio file.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("m4a" | "aac") => "audio/mp4",
        _ => "application/octet-stream",
    }
}
