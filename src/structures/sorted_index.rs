//! Ordered id → handle index over keys with fallible comparisons
//!
//! Entries live in a vector sorted by key. Lookups binary search with
//! [`CitationKey::try_cmp`], so every search may fail. Insertion is split into
//! a fallible `search` and an infallible `insert_at`, and removal never
//! compares keys: undoing an insert is `remove_at` on the position the insert
//! reported, and deregistering dead nodes filters by handle.

use crate::core::types::CitationKey;
use crate::structures::arena::NodeKey;
use std::cmp::Ordering;

/// Sorted index from keys to arena handles.
pub struct SortedIndex<K> {
    entries: Vec<(K, NodeKey)>,
}

impl<K: CitationKey> SortedIndex<K> {
    /// Create an index with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Locate `key`: `Ok(Ok(pos))` when present, `Ok(Err(pos))` with the
    /// insertion point when absent.
    pub fn search(&self, key: &K) -> Result<Result<usize, usize>, K::Error> {
        let mut lo = 0;
        let mut hi = self.entries.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.entries[mid].0.try_cmp(key)? {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Ok(Ok(mid)),
            }
        }
        Ok(Err(lo))
    }

    /// Handle registered under `key`, if any.
    pub fn get(&self, key: &K) -> Result<Option<NodeKey>, K::Error> {
        Ok(self.search(key)?.ok().map(|pos| self.entries[pos].1))
    }

    /// Insert at a position obtained from [`SortedIndex::search`].
    #[inline]
    pub fn insert_at(&mut self, pos: usize, key: K, value: NodeKey) {
        self.entries.insert(pos, (key, value));
    }

    /// Remove the entry at `pos`.
    #[inline]
    pub fn remove_at(&mut self, pos: usize) -> (K, NodeKey) {
        self.entries.remove(pos)
    }

    /// Keep only the entries whose handle satisfies `keep`.
    pub fn retain_values(&mut self, mut keep: impl FnMut(NodeKey) -> bool) {
        self.entries.retain(|(_, value)| keep(*value));
    }

    /// Number of entries.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, NodeKey)> {
        self.entries.iter().map(|(key, value)| (key, *value))
    }
}
