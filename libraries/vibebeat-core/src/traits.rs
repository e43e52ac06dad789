/// Core traits for VibeBeat
use crate::types::Song;

/// Read access to a catalog of songs keyed by filename.
///
/// Implemented by catalog snapshots. Playback and view code only ever read
/// through this trait, never from the backend directly.
pub trait SongLookup {
    /// Find a song by its filename
    fn lookup(&self, filename: &str) -> Option<&Song>;

    /// Whether `filename` resolves to a known song
    fn has_song(&self, filename: &str) -> bool {
        self.lookup(filename).is_some()
    }

    /// Title to render for `filename`.
    ///
    /// A stale reference (filename absent from the catalog) falls back to the
    /// raw filename instead of failing.
    fn display_title(&self, filename: &str) -> String {
        match self.lookup(filename) {
            Some(song) => song.title.clone(),
            None => filename.to_string(),
        }
    }
}

impl SongLookup for std::collections::HashMap<String, Song> {
    fn lookup(&self, filename: &str) -> Option<&Song> {
        self.get(filename)
    }
}

impl SongLookup for [Song] {
    fn lookup(&self, filename: &str) -> Option<&Song> {
        self.iter().find(|s| s.filename == filename)
    }
}

impl SongLookup for Vec<Song> {
    fn lookup(&self, filename: &str) -> Option<&Song> {
        self.as_slice().lookup(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::title::format_display_title;

    #[test]
    fn stale_reference_renders_raw_filename() {
        let songs = vec![Song::new("a.mp3", "http://host/play/a.mp3")];

        assert_eq!(songs.display_title("a.mp3"), "a");
        assert_eq!(songs.display_title("gone.mp3"), "gone.mp3");
        assert!(songs.has_song("a.mp3"));
        assert!(!songs.has_song("gone.mp3"));
    }

    #[test]
    fn display_title_matches_formatter() {
        let songs = vec![Song::new("b.flac", "u")];
        assert_eq!(songs.display_title("b.flac"), format_display_title("b.flac"));
    }
}
