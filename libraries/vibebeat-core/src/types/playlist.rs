/// Playlist domain types
use crate::types::SongRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned playlist identifier
pub type PlaylistId = i64;

/// Server-backed playlist.
///
/// Membership is an ordered sequence, not a set: the same filename may appear
/// more than once and order is preserved as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Server-assigned identifier
    pub id: PlaylistId,

    /// Playlist name (non-empty)
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Ordered song references
    #[serde(default)]
    pub songs: Vec<SongRef>,

    /// Creation timestamp, when the backend reports one
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Playlist {
    /// Create a playlist record (mainly for fakes and tests)
    pub fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            songs: Vec::new(),
            created_at: None,
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Whether `filename` appears at least once
    pub fn contains(&self, filename: &str) -> bool {
        self.songs.iter().any(|s| s == filename)
    }

    /// Number of times `filename` appears
    pub fn occurrences(&self, filename: &str) -> usize {
        self.songs.iter().filter(|s| *s == filename).count()
    }

    /// Filenames in playlist order
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.songs.iter().map(SongRef::filename)
    }

    /// Description, or an empty string when absent
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Song count for display: "1 song", "3 songs"
    pub fn song_count_label(&self) -> String {
        let n = self.songs.len();
        format!("{} song{}", n, if n == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_backend_record() {
        let json = r#"{
            "id": 3,
            "name": "Mix",
            "description": null,
            "songs": ["a.mp3", {"filename": "b.mp3"}, "a.mp3"]
        }"#;

        let playlist: Playlist = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.id, 3);
        assert_eq!(playlist.name, "Mix");
        assert_eq!(playlist.description_or_empty(), "");
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.occurrences("a.mp3"), 2);
        assert!(playlist.created_at.is_none());
    }

    #[test]
    fn missing_songs_defaults_to_empty() {
        let playlist: Playlist = serde_json::from_str(r#"{"id": 1, "name": "Empty"}"#).unwrap();
        assert!(playlist.is_empty());
    }

    #[test]
    fn created_at_accepts_camel_case() {
        let playlist: Playlist = serde_json::from_str(
            r#"{"id": 1, "name": "Dated", "createdAt": "2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(playlist.created_at.is_some());
    }

    #[test]
    fn count_label_pluralizes() {
        let mut playlist = Playlist::new(1, "Mix");
        assert_eq!(playlist.song_count_label(), "0 songs");
        playlist.songs.push(SongRef::new("a.mp3"));
        assert_eq!(playlist.song_count_label(), "1 song");
        playlist.songs.push(SongRef::new("b.mp3"));
        assert_eq!(playlist.song_count_label(), "2 songs");
    }
}
