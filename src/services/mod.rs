//! Services Module
//!
//! Boundary to the external collaborators: the hosted language model, the
//! speech recognizer, the web scraper and document readers. Each takes
//! validated input and returns text or an [`AppError::Service`].
//!
//! [`AppError::Service`]: crate::error::AppError::Service

mod document;
mod gemini;
mod scrape;
mod summary;
mod transcribe;

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use document::{chunk_text, extract_paragraphs, html_to_text, strip_markdown, FileTextReader, CHUNK_WORDS};
pub use gemini::GeminiClient;
pub use scrape::HttpScraper;
pub use summary::SummaryService;
pub use transcribe::WhisperCli;

// == Collaborator Traits ==
/// A hosted text-generation model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier, for logs
    fn name(&self) -> &str;

    /// Generates a completion for `prompt`. Empty output is an error.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Speech-to-text for local files and media URLs.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe_file(&self, path: &Path) -> Result<String>;

    async fn transcribe_url(&self, url: &str) -> Result<String>;
}

/// Main-text extraction from a web page.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn extract_main_text(&self, url: &str) -> Result<String>;
}

/// Text extraction from a document on disk.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn read(&self, path: &Path) -> Result<String>;
}

/// What a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// An article to scrape
    Webpage,
    /// Audio or video to transcribe
    Media,
}
