use rustc_hash::FxHashSet;

use crate::core::types::Record;

/// Per-domain seen-set. First record for a URL wins.
///
/// Owned by the single task draining the merged stream, so the
/// check-and-insert in [`Deduplicator::admit`] cannot race.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: FxHashSet<String>,
    duplicates: usize,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pass `record` through if its URL is new, drop it otherwise.
    pub fn admit(&mut self, record: Record) -> Option<Record> {
        if self.admit_url(&record.url) {
            Some(record)
        } else {
            None
        }
    }

    /// Mark `url` as seen; returns false if it already was.
    pub fn admit_url(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            self.duplicates += 1;
            false
        } else {
            self.seen.insert(url.to_string());
            true
        }
    }

    pub fn unique(&self) -> usize {
        self.seen.len()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
