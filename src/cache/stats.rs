//! Cache Statistics Module
//!
//! Lookup counters for the memoization store and the one-line summary shown
//! to users.

use std::fmt;

use serde::Serialize;

/// Outcome of a single store lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Hit,
    Miss,
}

// == Cache Stats ==
/// Counters since the store was created or last cleared.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CacheStats {
    /// Calls answered from the store
    pub hits: u64,
    /// Calls that had to invoke the wrapped function
    pub misses: u64,
    /// Entries held at snapshot time
    pub total_entries: usize,
}

impl CacheStats {
    pub fn record(&mut self, lookup: Lookup) {
        match lookup {
            Lookup::Hit => self.hits += 1,
            Lookup::Miss => self.misses += 1,
        }
    }

    /// Copy of the counters paired with the current entry count.
    pub fn snapshot(&self, total_entries: usize) -> Self {
        Self {
            total_entries,
            ..self.clone()
        }
    }

    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups served from the store, 0.0 before the first one.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cache size: {} items | Hits: {} | Misses: {} | Hit rate: {:.1}%",
            self.total_entries,
            self.hits,
            self.misses,
            self.hit_rate() * 100.0
        )
    }
}
