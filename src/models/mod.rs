//! Request and Response models for the summarizer API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ExtendRequest, FileRequest, SummarizeTextRequest, TranslateRequest, UrlRequest};
pub use responses::{
    ClearResponse, EstimateResponse, HealthResponse, LanguagesResponse, StatsResponse,
    TextResponse,
};
