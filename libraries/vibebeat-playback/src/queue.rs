//! Play queue
//!
//! An ordered list of filenames plus a cursor. Entries are resolved against
//! the catalog only when played, so a queue built from a playlist may hold
//! stale references.

use crate::types::{QueueEndPolicy, QueueSource};
use rand::Rng;

/// Ordered queue of filenames with a current index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayQueue {
    entries: Vec<String>,
    index: Option<usize>,
    source: QueueSource,
}

impl PlayQueue {
    /// Empty queue
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: None,
            source: QueueSource::AdHoc,
        }
    }

    /// Queue holding a single song
    pub fn ad_hoc(filename: impl Into<String>) -> Self {
        Self::from_entries(vec![filename.into()], QueueSource::AdHoc)
    }

    /// Queue over `entries` with no cursor yet
    pub fn from_entries(entries: Vec<String>, source: QueueSource) -> Self {
        Self {
            entries,
            index: None,
            source,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn source(&self) -> &QueueSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    pub fn current(&self) -> Option<&str> {
        self.index
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Index of `filename`, preferring the current position on duplicates
    pub fn position_of(&self, filename: &str) -> Option<usize> {
        if self.current() == Some(filename) {
            return self.index;
        }
        self.entries.iter().position(|e| e == filename)
    }

    /// Move the cursor; returns false when `index` is out of range
    pub fn set_index(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.index = Some(index);
            true
        } else {
            false
        }
    }

    pub fn is_at_last(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 >= self.entries.len())
    }

    /// Indices after the cursor in play order; under `Wrap` the ones before
    /// it follow.
    pub fn indices_after(&self, policy: QueueEndPolicy) -> Vec<usize> {
        let Some(current) = self.index else {
            return Vec::new();
        };
        let mut indices: Vec<usize> = (current + 1..self.entries.len()).collect();
        if policy == QueueEndPolicy::Wrap {
            indices.extend(0..current);
        }
        indices
    }

    /// Indices before the cursor, nearest first; under `Wrap` continues
    /// from the end.
    pub fn indices_before(&self, policy: QueueEndPolicy) -> Vec<usize> {
        let Some(current) = self.index else {
            return Vec::new();
        };
        let mut indices: Vec<usize> = (0..current).rev().collect();
        if policy == QueueEndPolicy::Wrap {
            indices.extend((current + 1..self.entries.len()).rev());
        }
        indices
    }

    /// Every index except the cursor, starting at `start` and wrapping
    pub fn indices_from(&self, start: usize) -> Vec<usize> {
        let len = self.entries.len();
        (0..len)
            .map(|offset| (start + offset) % len)
            .filter(|&i| Some(i) != self.index)
            .collect()
    }

    /// Uniformly random index other than the cursor
    ///
    /// `None` when the queue has fewer than two entries.
    pub fn random_other_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        let len = self.entries.len();
        if len < 2 {
            return None;
        }
        match self.index {
            Some(current) => {
                // Draw from len - 1 slots and skip over the current one
                let pick = rng.gen_range(0..len - 1);
                Some(if pick >= current { pick + 1 } else { pick })
            }
            None => Some(rng.gen_range(0..len)),
        }
    }
}

impl Default for PlayQueue {
    fn default() -> Self {
        Self::new()
    }
}
