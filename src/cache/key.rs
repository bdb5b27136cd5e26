//! Cache Key Module
//!
//! Derives deterministic keys from a function name and its arguments.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};

// == Cache Key ==
/// Deterministic identifier of one function call: `<name>_<sha256 of args>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Key Strategy ==
/// Turns a function identity and its arguments into a [`CacheKey`].
pub trait KeyStrategy<A: ?Sized>: Send + Sync {
    fn derive(&self, function: &str, args: &A) -> Result<CacheKey>;
}

/// Default strategy: canonical JSON of the arguments, hashed with SHA-256.
///
/// Object keys are sorted recursively and the output uses compact separators,
/// so two structurally equal arguments hash the same whatever the map order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalJsonKey;

impl<A: Serialize + ?Sized> KeyStrategy<A> for CanonicalJsonKey {
    fn derive(&self, function: &str, args: &A) -> Result<CacheKey> {
        let encoded = canonical_encoding(args)?;
        let digest = Sha256::digest(encoded.as_bytes());
        Ok(CacheKey(format!("{}_{}", function, hex::encode(digest))))
    }
}

// == Canonical Encoding ==
/// Serializes a value to JSON with object keys sorted at every depth.
pub fn canonical_encoding<A: Serialize + ?Sized>(args: &A) -> Result<String> {
    let value =
        serde_json::to_value(args).map_err(|e| AppError::KeyEncoding(e.to_string()))?;
    let mut out = String::new();
    write_canonical(&value, &mut out);
    Ok(out)
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<_> = map.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, val)) in fields.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // Serializing a &str cannot fail
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(val, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
