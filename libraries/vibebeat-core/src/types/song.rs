/// Song domain types
use crate::title::format_display_title;
use serde::{Deserialize, Serialize};

/// Artist shown for uploaded songs (the backend stores no tags)
pub const DEFAULT_ARTIST: &str = "Unknown Artist";

/// Album shown for uploaded songs
pub const DEFAULT_ALBUM: &str = "Default Album";

/// A song in the catalog.
///
/// The filename is the primary key. Title, artist and album are derived or
/// defaulted client-side and are not authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique filename (catalog key)
    pub filename: String,

    /// Display title (filename without extension)
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Playable media URL
    pub url: String,
}

impl Song {
    /// Create a song with a derived title and default artist/album
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            title: format_display_title(&filename),
            filename,
            artist: DEFAULT_ARTIST.to_string(),
            album: DEFAULT_ALBUM.to_string(),
            url: url.into(),
        }
    }
}

/// Reference to a song from inside a playlist.
///
/// The backend returns playlist entries either as bare filenames or as
/// `{"filename": ...}` objects; both deserialize to the same reference.
/// A reference may point at a filename no longer present in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SongRefRepr", into = "String")]
pub struct SongRef(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum SongRefRepr {
    Filename(String),
    Object { filename: String },
}

impl From<SongRefRepr> for SongRef {
    fn from(repr: SongRefRepr) -> Self {
        match repr {
            SongRefRepr::Filename(filename) | SongRefRepr::Object { filename } => Self(filename),
        }
    }
}

impl From<SongRef> for String {
    fn from(song_ref: SongRef) -> Self {
        song_ref.0
    }
}

impl SongRef {
    pub fn new(filename: impl Into<String>) -> Self {
        Self(filename.into())
    }

    /// Filename this entry points at
    pub fn filename(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SongRef {
    fn from(filename: &str) -> Self {
        Self(filename.to_string())
    }
}

impl PartialEq<str> for SongRef {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_song_derives_title_and_defaults() {
        let song = Song::new("Blue Monday.mp3", "http://host/play/Blue%20Monday.mp3");

        assert_eq!(song.filename, "Blue Monday.mp3");
        assert_eq!(song.title, "Blue Monday");
        assert_eq!(song.artist, DEFAULT_ARTIST);
        assert_eq!(song.album, DEFAULT_ALBUM);
    }

    #[test]
    fn song_ref_from_string_and_object() {
        let refs: Vec<SongRef> =
            serde_json::from_str(r#"["a.mp3", {"filename": "b.mp3"}, {"filename": "a.mp3", "file_id": "x"}]"#)
                .unwrap();

        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].filename(), "a.mp3");
        assert_eq!(refs[1].filename(), "b.mp3");
        assert_eq!(refs[2], refs[0]);
    }

    #[test]
    fn song_ref_serializes_as_filename() {
        let json = serde_json::to_string(&SongRef::new("c.mp3")).unwrap();
        assert_eq!(json, r#""c.mp3""#);
    }
}
