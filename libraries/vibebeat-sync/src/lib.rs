//! VibeBeat Sync
//!
//! Keeps the client's in-memory mirror of songs and playlists consistent
//! with the backend. Every mutation is followed by a full re-fetch; there is
//! no local patching and no diffing.
//!
//! Overlapping refreshes are coalesced, so a burst of actions costs one
//! request per cache.

mod catalog;
mod error;
mod orchestrator;
mod registry;
mod single_flight;
pub mod views;

// Public exports
pub use catalog::{AlbumGroup, ArtistGroup, Catalog, CatalogCache, SearchResults};
pub use error::{Result, SyncError};
pub use orchestrator::{Notice, NoticeLevel, NoticeLog, NullObserver, SyncObserver, SyncOrchestrator};
pub use registry::{PlaylistRegistry, PlaylistSnapshot};
pub use single_flight::SingleFlight;
