//! Cache Entry Module
//!
//! Defines the structure for individual memoized results.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A stored function result plus bookkeeping.
///
/// The value is kept in its serialized form so one store can hold results of
/// any return type. It is never mutated after insertion.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored result
    value: Value,
    /// Approximate size of the stored result in bytes
    approx_bytes: usize,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Number of times this entry answered a call
    pub hits: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry around a serialized result.
    pub fn new(value: Value) -> Self {
        let approx_bytes = value.to_string().len();
        Self {
            value,
            approx_bytes,
            created_at: current_timestamp_ms(),
            hits: 0,
        }
    }

    /// Returns the stored result.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the approximate memory footprint of the stored result.
    pub fn approx_bytes(&self) -> usize {
        self.approx_bytes
    }

    // == Record Hit ==
    /// Increments this entry's hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
