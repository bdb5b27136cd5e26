//! API Handlers
//!
//! HTTP request handlers for each summarizer endpoint. Every handler runs its
//! input checks first, so a rejected request never reaches the cache or a
//! service.

use axum::{extract::State, Json};
use tracing::info;

use crate::cache::{Cache, CacheInfo};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    ClearResponse, EstimateResponse, ExtendRequest, FileRequest, HealthResponse,
    LanguagesResponse, StatsResponse, SummarizeTextRequest, TextResponse, TranslateRequest,
    UrlRequest,
};
use crate::services::SummaryService;
use crate::validation::{estimate_processing_time, file_type_info, supported_languages};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Language model operations
    pub service: SummaryService,
    /// Handle to the store the service memoizes into
    pub cache: Cache,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: SummaryService) -> Self {
        let cache = service.cache().clone();
        Self { service, cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the Gemini-backed service over a fresh cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let service = SummaryService::from_config(config, Cache::new())?;
        Ok(Self::new(service))
    }
}

/// Handler for POST /summarize
pub async fn summarize_handler(
    State(state): State<AppState>,
    Json(req): Json<SummarizeTextRequest>,
) -> Result<Json<TextResponse>> {
    req.validate()?;
    let summary = state.service.summarize_text(&req.text).await?;
    Ok(Json(TextResponse::new(summary)))
}

/// Handler for POST /summarize/file
pub async fn summarize_file_handler(
    State(state): State<AppState>,
    Json(req): Json<FileRequest>,
) -> Result<Json<TextResponse>> {
    req.validate_document()?;
    let summary = state.service.summarize_file(&req.path).await?;
    Ok(Json(TextResponse::new(summary)))
}

/// Handler for POST /extend
///
/// Uses the focused prompt when `custom_prompt` is given.
pub async fn extend_handler(
    State(state): State<AppState>,
    Json(req): Json<ExtendRequest>,
) -> Result<Json<TextResponse>> {
    req.validate()?;
    let extended = match req.custom_prompt.as_deref() {
        Some(prompt) => {
            state
                .service
                .extend_summary_custom(&req.summary, prompt.trim())
                .await?
        }
        None => state.service.extend_summary(&req.summary).await?,
    };
    Ok(Json(TextResponse::new(extended)))
}

/// Handler for POST /translate
pub async fn translate_handler(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TextResponse>> {
    req.validate()?;
    let translated = state
        .service
        .translate_text(&req.text, req.language.trim())
        .await?;
    Ok(Json(TextResponse::new(translated)))
}

/// Handler for POST /url
///
/// Returns the article text or the media transcript behind the URL.
pub async fn url_handler(
    State(state): State<AppState>,
    Json(req): Json<UrlRequest>,
) -> Result<Json<TextResponse>> {
    req.validate()?;
    let text = state
        .service
        .text_from_url(req.url.trim(), req.source)
        .await?;
    Ok(Json(TextResponse::new(text)))
}

/// Handler for POST /transcribe
pub async fn transcribe_handler(
    State(state): State<AppState>,
    Json(req): Json<FileRequest>,
) -> Result<Json<TextResponse>> {
    req.validate_media()?;
    let transcript = state.service.transcribe_file(&req.path).await?;
    Ok(Json(TextResponse::new(transcript)))
}

/// Handler for POST /estimate
pub async fn estimate_handler(Json(req): Json<FileRequest>) -> Json<EstimateResponse> {
    Json(EstimateResponse {
        estimate: estimate_processing_time(&req.path).to_string(),
        file: file_type_info(&req.path).ok(),
    })
}

/// Handler for GET /languages
pub async fn languages_handler() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: supported_languages().to_vec(),
    })
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /cache/info
pub async fn info_handler(State(state): State<AppState>) -> Json<CacheInfo> {
    Json(state.cache.info().await)
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let message = state.cache.clear().await;
    info!("Cache cleared through the API");
    Json(ClearResponse { message })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
