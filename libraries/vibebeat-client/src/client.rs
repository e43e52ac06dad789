//! Main VibeBeat backend client.

use crate::error::{ClientError, Result};
use crate::playlists::PlaylistsClient;
use crate::songs::SongsClient;
use crate::types::{ClientConfig, SongRecord};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Client for a VibeBeat song and playlist backend.
///
/// Every request is bounded by the configured timeout. Idempotent requests
/// (GET, PUT, DELETE) are retried on network failures and timeouts according
/// to the configured [`RetryPolicy`](crate::RetryPolicy). Dropping a request
/// future cancels the request.
///
/// # Example
///
/// ```ignore
/// use vibebeat_client::{ClientConfig, VibeClient};
///
/// let client = VibeClient::new(ClientConfig::new("http://127.0.0.1:8000"))?;
///
/// for record in client.songs().list().await? {
///     println!("{} -> {}", record.filename, client.media_url(&record));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct VibeClient {
    http: Client,
    config: ClientConfig,
}

impl VibeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("VibeBeat/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::from)?;

        Ok(Self {
            http,
            config: ClientConfig { url, ..config },
        })
    }

    /// Normalized backend URL, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Song catalog operations.
    pub fn songs(&self) -> SongsClient<'_> {
        SongsClient::new(self)
    }

    /// Playlist operations.
    pub fn playlists(&self) -> PlaylistsClient<'_> {
        PlaylistsClient::new(self)
    }

    /// Playable URL for a song record.
    ///
    /// A record with a stream path is played from `base + path`. Otherwise
    /// the record is streamed through `/play/{id}`, falling back to the
    /// filename when the backend reported no id.
    pub fn media_url(&self, record: &SongRecord) -> String {
        match record.path.as_deref() {
            Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
                path.to_string()
            }
            Some(path) if !path.is_empty() => {
                if path.starts_with('/') {
                    format!("{}{}", self.config.url, path)
                } else {
                    format!("{}/{}", self.config.url, path)
                }
            }
            _ => {
                let key = record.id.as_deref().unwrap_or(&record.filename);
                self.endpoint(&format!("/play/{}", urlencoding::encode(key)))
            }
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Send an idempotent request, retrying transient failures.
    ///
    /// `build` is called once per attempt since a sent request cannot be
    /// replayed.
    pub(crate) async fn send_idempotent<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let policy = self.config.retry;
        let mut attempt: u32 = 0;

        loop {
            match build(&self.http).send().await {
                Ok(response) => return check_status(response).await,
                Err(e) => {
                    let err = ClientError::from(e);
                    if attempt >= policy.max_retries || !err.kind().is_transient() {
                        return Err(err);
                    }
                    attempt += 1;
                    warn!(attempt, error = %err, "Request failed, retrying");
                    tokio::time::sleep(policy.backoff).await;
                }
            }
        }
    }

    /// Send a request exactly once.
    pub(crate) async fn send_once(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        check_status(response).await
    }
}

/// Turn a non-success status into [`ClientError::Backend`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %error_text, "Backend rejected request");
        Err(ClientError::Backend {
            status: status.as_u16(),
            message: error_message(&error_text),
        })
    }
}

/// Pull `detail`/`error`/`message` out of a JSON error body when present.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "error", "message"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

/// Decode a JSON body, labelling failures with `what`.
pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}
