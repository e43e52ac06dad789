//! VibeBeat Storage
//!
//! Local persistence for client-only state: the remembered user, liked
//! songs and recently played history. The backing store is an opaque
//! key-value map of JSON values ([`KeyValueStore`]); [`JsonFileStore`] keeps
//! it in one file on disk.
//!
//! Playlists are never stored here. They live on the backend only.

mod error;
mod session;
mod store;

pub use error::{Result, StorageError};
pub use session::{
    validate_login, AutosaveHandle, SessionStore, UserSession, KEY_LIKED_SONGS,
    KEY_RECENTLY_PLAYED, KEY_USER, LEGACY_KEY_PLAYLISTS, MIN_PASSWORD_LEN,
};
pub use store::{get_value, set_value, JsonFileStore, KeyValueStore, MemoryStore};
