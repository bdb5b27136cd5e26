//! Cache Store Module
//!
//! Key-to-entry storage with hit/miss bookkeeping and diagnostics.
//!
//! There is no eviction: the store grows until it is cleared.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheEntry, CacheKey, CacheStats, Lookup};

// == Cache Store ==
/// Storage for memoized results.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

/// Diagnostic view of one entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CacheEntryInfo {
    pub key: String,
    pub approx_bytes: usize,
    pub hits: u64,
    pub created_at: u64,
}

/// Diagnostic view of the whole store, for auditing memory usage.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CacheInfo {
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub approx_total_bytes: usize,
    /// Entries sorted by key
    pub entries: Vec<CacheEntryInfo>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Looks up a stored result.
    ///
    /// A found entry counts as a hit, an absent one as a miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<Value> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.record_hit();
                self.stats.record(Lookup::Hit);
                Some(entry.value().clone())
            }
            None => {
                self.stats.record(Lookup::Miss);
                None
            }
        }
    }

    // == Insert ==
    /// Stores a result. An existing entry under the same key is replaced.
    pub fn insert(&mut self, key: CacheKey, value: Value) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Contains ==
    /// Checks for a key without touching the statistics.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    // == Clear ==
    /// Removes every entry and resets the counters.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats = CacheStats::default();
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Info ==
    /// Returns per-entry diagnostics.
    pub fn info(&self) -> CacheInfo {
        let mut entries: Vec<CacheEntryInfo> = self
            .entries
            .iter()
            .map(|(key, entry)| CacheEntryInfo {
                key: key.to_string(),
                approx_bytes: entry.approx_bytes(),
                hits: entry.hits,
                created_at: entry.created_at,
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        CacheInfo {
            total_entries: self.entries.len(),
            hits: self.stats.hits,
            misses: self.stats.misses,
            approx_total_bytes: entries.iter().map(|e| e.approx_bytes).sum(),
            entries,
        }
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
