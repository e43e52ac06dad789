//! VibeBeat Client
//!
//! HTTP client library for the VibeBeat song and playlist backend.
//!
//! # Features
//!
//! - **Songs**: list the catalog, upload files, build playable media URLs
//! - **Playlists**: create, rename, delete, add and remove songs
//! - **Legacy playlist**: read the single server-side playlist
//! - **Resilience**: bounded request timeout, one retry for idempotent requests
//!
//! # Example
//!
//! ```ignore
//! use vibebeat_client::{ClientConfig, VibeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VibeClient::new(ClientConfig::new("http://127.0.0.1:8000"))?;
//!
//!     let songs = client.songs().list().await?;
//!     println!("Found {} songs", songs.len());
//!
//!     let id = client.playlists().create("Mix", "").await?;
//!     println!("Created playlist {:?}", id);
//!
//!     Ok(())
//! }
//! ```

mod backend;
mod client;
mod error;
mod playlists;
mod songs;
mod types;

// Re-export main types
pub use backend::MusicBackend;
pub use client::VibeClient;
pub use error::{ClientError, Result};
pub use types::{
    ClientConfig, LegacyPlaylistEntry, PlaylistInput, RetryPolicy, SongRecord,
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
};

// Re-export sub-clients for direct use if needed
pub use playlists::PlaylistsClient;
pub use songs::SongsClient;
