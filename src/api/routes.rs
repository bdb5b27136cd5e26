//! API Routes
//!
//! Configures the Axum router with all summarizer endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, estimate_handler, extend_handler, health_handler, info_handler,
    languages_handler, stats_handler, summarize_file_handler, summarize_handler,
    transcribe_handler, translate_handler, url_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /summarize` - Summarize raw text
/// - `POST /summarize/file` - Summarize a document on disk
/// - `POST /extend` - Expand a summary, optionally with a focus
/// - `POST /translate` - Translate text
/// - `POST /url` - Fetch article text or a transcript from a URL
/// - `POST /transcribe` - Transcribe a media file on disk
/// - `POST /estimate` - Estimate processing time for a file
/// - `GET /languages` - List supported translation languages
/// - `GET /cache/stats` - Cache statistics
/// - `GET /cache/info` - Per-entry cache details
/// - `DELETE /cache` - Clear the cache
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/summarize", post(summarize_handler))
        .route("/summarize/file", post(summarize_file_handler))
        .route("/extend", post(extend_handler))
        .route("/translate", post(translate_handler))
        .route("/url", post(url_handler))
        .route("/transcribe", post(transcribe_handler))
        .route("/estimate", post(estimate_handler))
        .route("/languages", get(languages_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/info", get(info_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
