//! Display helpers for song titles and playback times

/// Strip the final extension from a filename.
///
/// Only a trailing `.ext` segment is removed, and only when `ext` is
/// non-empty and contains neither `.` nor `/`. Everything else is returned
/// unchanged:
///
/// ```rust
/// use vibebeat_core::strip_extension;
///
/// assert_eq!(strip_extension("song.mp3"), "song");
/// assert_eq!(strip_extension("live.at.wembley.flac"), "live.at.wembley");
/// assert_eq!(strip_extension("no_extension"), "no_extension");
/// assert_eq!(strip_extension("trailing."), "trailing.");
/// assert_eq!(strip_extension("dir.v2/track"), "dir.v2/track");
/// ```
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(dot) => {
            let ext = &filename[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                filename
            } else {
                &filename[..dot]
            }
        }
        None => filename,
    }
}

/// Title shown for a song identified by `filename`.
pub fn format_display_title(filename: &str) -> String {
    strip_extension(filename).to_string()
}

/// Format seconds as `m:ss`.
///
/// Negative, NaN and infinite inputs render as `0:00`, matching an audio
/// element that has not loaded metadata yet.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_common_extensions() {
        assert_eq!(strip_extension("a.mp3"), "a");
        assert_eq!(strip_extension("b.flac"), "b");
        assert_eq!(strip_extension("My Song.m4a"), "My Song");
    }

    #[test]
    fn strip_only_last_extension() {
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn hidden_file_strips_to_empty() {
        assert_eq!(strip_extension(".hidden"), "");
    }

    #[test]
    fn format_time_values() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }
}
