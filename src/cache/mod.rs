//! Cache Module
//!
//! Memoizes expensive service calls keyed by function name and canonicalized
//! arguments, with statistics, diagnostics and full invalidation.

mod entry;
mod key;
mod memoize;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{canonical_encoding, CacheKey, CanonicalJsonKey, KeyStrategy};
pub use memoize::{Cache, Memoized, CLEAR_MESSAGE};
pub use stats::{CacheStats, Lookup};
pub use store::{CacheEntryInfo, CacheInfo, CacheStore};
