use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory record of link counts already extracted in this process
///
/// Keyed by chapter number. Never persisted; a fresh process starts empty.
#[derive(Debug, Default)]
pub struct ExpectedCountCache {
    counts: Mutex<HashMap<u32, usize>>,
}

impl ExpectedCountCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count recorded for a chapter, if any
    pub fn get(&self, chapter: u32) -> Option<usize> {
        self.lock().get(&chapter).copied()
    }

    /// Records (or replaces) a chapter's count
    pub fn insert(&self, chapter: u32, count: usize) {
        self.lock().insert(chapter, count);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u32, usize>> {
        self.counts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing() {
        let cache = ExpectedCountCache::new();
        assert_eq!(cache.get(1), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_and_replace() {
        let cache = ExpectedCountCache::new();
        cache.insert(3, 10);
        assert_eq!(cache.get(3), Some(10));

        cache.insert(3, 12);
        assert_eq!(cache.get(3), Some(12));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_count_is_cached() {
        let cache = ExpectedCountCache::new();
        cache.insert(8, 0);
        assert_eq!(cache.get(8), Some(0));
    }
}
