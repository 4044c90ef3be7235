//! Segment encoding memo.
//!
//! Natural text repeats words constantly, and encoding a segment means
//! replaying the whole merge sequence over it. The encoder therefore keeps
//! a small bounded cache of segment text to token IDs, evicting the least
//! recently used entry when full.

use ahash::AHashMap;
use akshara_core::Result;
use compact_str::CompactString;
use std::collections::VecDeque;

/// Bounded LRU cache mapping segment text to its encoded token IDs.
pub struct SegmentCache {
    entries: AHashMap<CompactString, Vec<u32>>,
    /// Recency order, least recently used first
    order: VecDeque<CompactString>,
    capacity: usize,
}

impl SegmentCache {
    /// Create a cache holding at most `capacity` segments.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: AHashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Return the cached encoding for `segment`, or compute and cache it.
    pub fn get_or_encode<F>(&mut self, segment: &str, encode: F) -> Result<Vec<u32>>
    where
        F: FnOnce(&str) -> Result<Vec<u32>>,
    {
        if let Some(ids) = self.entries.get(segment) {
            let ids = ids.clone();
            self.touch(segment);
            return Ok(ids);
        }

        let ids = encode(segment)?;
        self.insert(CompactString::new(segment), ids.clone());
        Ok(ids)
    }

    fn touch(&mut self, segment: &str) {
        if let Some(pos) = self.order.iter().position(|s| s == segment) {
            if let Some(key) = self.order.remove(pos) {
                self.order.push_back(key);
            }
        }
    }

    fn insert(&mut self, key: CompactString, ids: Vec<u32>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, ids);
    }

    /// Number of cached segments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_skips_recompute() {
        let mut cache = SegmentCache::with_capacity(4);

        let first = cache.get_or_encode("ab", |_| Ok(vec![7])).unwrap();
        assert_eq!(first, vec![7]);

        let second = cache
            .get_or_encode("ab", |_| panic!("must not re-encode"))
            .unwrap();
        assert_eq!(second, vec![7]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = SegmentCache::with_capacity(2);

        cache.get_or_encode("a", |_| Ok(vec![1])).unwrap();
        cache.get_or_encode("b", |_| Ok(vec![2])).unwrap();
        // touch "a" so "b" becomes the eviction victim
        cache.get_or_encode("a", |_| Ok(vec![1])).unwrap();
        cache.get_or_encode("c", |_| Ok(vec![3])).unwrap();

        assert!(cache.entries.contains_key("a"));
        assert!(!cache.entries.contains_key("b"));
        assert!(cache.entries.contains_key("c"));
    }

    #[test]
    fn test_zero_capacity_never_stores() {
        let mut cache = SegmentCache::with_capacity(0);
        cache.get_or_encode("a", |_| Ok(vec![1])).unwrap();
        assert!(cache.is_empty());
    }
}
