//! Recently played tracking
//!
//! Maintains a bounded, duplicate-free list of played songs, most recent first.

use std::collections::VecDeque;

/// Default number of entries kept.
pub const DEFAULT_RECENTLY_PLAYED_LIMIT: usize = 20;

/// Bounded most-recent-first history of song identifiers.
///
/// Replaying a song already in the list moves it to the front instead of
/// inserting a duplicate. When full, the oldest entry is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentlyPlayed {
    /// Song filenames (most recent = front)
    entries: VecDeque<String>,

    /// Maximum number of entries
    limit: usize,
}

impl RecentlyPlayed {
    /// Create an empty history holding at most `limit` entries
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Rebuild a history from persisted entries (most recent first).
    ///
    /// Duplicates keep their first (most recent) occurrence and the list is
    /// truncated to `limit`.
    pub fn from_entries(entries: impl IntoIterator<Item = String>, limit: usize) -> Self {
        let mut recent = Self::new(limit);
        for filename in entries {
            if recent.entries.len() >= limit {
                break;
            }
            if !recent.contains(&filename) {
                recent.entries.push_back(filename);
            }
        }
        recent
    }

    /// Record a play of `filename`, moving it to the front
    pub fn record(&mut self, filename: &str) {
        if self.limit == 0 {
            return;
        }

        if let Some(pos) = self.entries.iter().position(|f| f == filename) {
            if let Some(existing) = self.entries.remove(pos) {
                self.entries.push_front(existing);
            }
            return;
        }

        self.entries.push_front(filename.to_string());
        while self.entries.len() > self.limit {
            self.entries.pop_back();
        }
    }

    /// Whether `filename` is in the history
    pub fn contains(&self, filename: &str) -> bool {
        self.entries.iter().any(|f| f == filename)
    }

    /// Iterate entries, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Owned copy of the entries, most recent first
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RecentlyPlayed {
    fn default() -> Self {
        Self::new(DEFAULT_RECENTLY_PLAYED_LIMIT)
    }
}
