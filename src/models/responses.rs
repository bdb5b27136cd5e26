//! Response DTOs for the summarizer API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::validation::FileTypeInfo;

/// Response body for every text-producing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TextResponse {
    /// Summary, extension, translation or transcript
    pub result: String,
}

impl TextResponse {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }
}

/// Response body for POST /estimate
#[derive(Debug, Clone, Serialize)]
pub struct EstimateResponse {
    pub estimate: String,
    /// Absent when the file cannot be read
    pub file: Option<FileTypeInfo>,
}

/// Response body for GET /languages
#[derive(Debug, Clone, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<&'static str>,
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Human-readable summary line
    pub summary: String,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            summary: stats.to_string(),
            hits: stats.hits,
            misses: stats.misses,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
