//! API Module
//!
//! HTTP handlers and routing for the summarizer REST API.
//!
//! # Endpoints
//! - `POST /summarize`, `POST /summarize/file` - Summaries
//! - `POST /extend`, `POST /translate` - Follow-up operations on a summary
//! - `POST /url`, `POST /transcribe` - Text from web pages and media
//! - `POST /estimate`, `GET /languages` - Helpers for clients
//! - `GET /cache/stats`, `GET /cache/info`, `DELETE /cache` - Cache control
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
