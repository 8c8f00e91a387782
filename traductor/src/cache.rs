//! Bounded memo cache for completed translations.
//!
//! Entries are keyed by (text, source, target, backend) and evicted in
//! insertion order once capacity is exceeded. A cached value is never
//! mutated: the first successful translation for a key wins, and a key
//! only re-enters the cache after being evicted.

use std::collections::{HashMap, VecDeque};

use crate::backend::Backend;

/// Identity of a memoizable translation.
///
/// Two requests that differ only in surrounding whitespace produce the same
/// key. The backend is part of the key, so the same text translated through
/// different backends occupies separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    text: String,
    source: String,
    target: String,
    backend: &'static str,
}

impl CacheKey {
    pub fn new(text: &str, source: &str, target: &str, backend: Backend) -> Self {
        Self {
            text: text.trim().to_string(),
            source: source.trim().to_string(),
            target: target.trim().to_string(),
            backend: backend.as_str(),
        }
    }
}

/// Insertion-order bounded map of completed translations.
///
/// Not synchronized; the dispatcher wraps it in a mutex.
#[derive(Debug)]
pub struct TranslationCache {
    entries: HashMap<CacheKey, String>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl TranslationCache {
    /// Default number of distinct keys kept in memory.
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Create a cache bounded to `capacity` entries. A capacity of zero is
    /// treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Look up a completed translation. Lookups do not affect eviction
    /// order.
    pub fn get(&self, key: &CacheKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert a completed translation, evicting the oldest entry once the
    /// capacity is exceeded. Inserting a key that is already present is a
    /// no-op: the stored value stays as it was.
    pub fn insert(&mut self, key: CacheKey, translated: String) {
        if self.entries.contains_key(&key) {
            return;
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, translated);

        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
