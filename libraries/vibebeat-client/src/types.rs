//! Types for VibeBeat backend requests and responses.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vibebeat_core::Playlist;

/// Default total time budget for one request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default time budget for establishing a connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for connecting to a VibeBeat backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://127.0.0.1:8000")
    pub url: String,
    /// Total time budget per request, including the body
    pub request_timeout: Duration,
    /// Time budget for establishing a connection
    pub connect_timeout: Duration,
    /// Retry policy for idempotent requests
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Create a config with just the URL and default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Retry policy for idempotent requests (GET, PUT, DELETE).
///
/// Only network failures and timeouts are retried. Non-idempotent requests
/// and backend error statuses are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Pause before each retry
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Never retry
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff: Duration::from_millis(250),
        }
    }
}

// =============================================================================
// Song Types
// =============================================================================

/// A song as listed by the backend.
///
/// Depending on the backend flavour a record carries a storage id (`_id`),
/// a stream `path`, or both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SongRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl SongRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            id: None,
            filename: filename.into(),
            path: None,
        }
    }
}

/// Response from `GET /songs`.
#[derive(Debug, Deserialize)]
pub(crate) struct SongsResponse {
    #[serde(default)]
    pub songs: Vec<SongRecord>,
}

// =============================================================================
// Playlist Types
// =============================================================================

/// Response from `GET /playlists`.
#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistsResponse {
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

/// Request body for creating or editing a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistInput {
    pub name: String,
    pub description: String,
}

/// Request body for adding a song to a playlist.
#[derive(Debug, Serialize)]
pub(crate) struct AddSongRequest<'a> {
    pub filename: &'a str,
}

/// Entry of the legacy single playlist (`GET /playlist`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LegacyPlaylistEntry {
    #[serde(default)]
    pub file_id: Option<String>,
    pub filename: String,
}

/// Response from `GET /playlist`.
#[derive(Debug, Deserialize)]
pub(crate) struct LegacyPlaylistResponse {
    #[serde(default)]
    pub playlist: Vec<LegacyPlaylistEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_record_with_id_only() {
        let record: SongRecord =
            serde_json::from_str(r#"{"_id": "65f0c", "filename": "a.mp3"}"#).unwrap();
        assert_eq!(record.id.as_deref(), Some("65f0c"));
        assert!(record.path.is_none());
    }

    #[test]
    fn song_record_with_path_only() {
        let record: SongRecord =
            serde_json::from_str(r#"{"filename": "a.mp3", "path": "/play/a.mp3"}"#).unwrap();
        assert!(record.id.is_none());
        assert_eq!(record.path.as_deref(), Some("/play/a.mp3"));
    }

    #[test]
    fn default_retry_policy_retries_once() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 1);
        assert_eq!(RetryPolicy::none().max_retries, 0);
    }
}
