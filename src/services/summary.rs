//! Summary Service
//!
//! Summarize, extend and translate through the language model, with every
//! text-in/text-out call memoized in the shared cache.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::{
    chunk_text, DocumentReader, GeminiClient, HttpScraper, LanguageModel, FileTextReader, Scraper,
    SourceKind, Transcriber, WhisperCli, CHUNK_WORDS,
};
use crate::validation::normalize_url;

/// Language-model backed text operations sharing one cache.
#[derive(Clone)]
pub struct SummaryService {
    model: Arc<dyn LanguageModel>,
    reader: Arc<dyn DocumentReader>,
    scraper: Arc<dyn Scraper>,
    transcriber: Arc<dyn Transcriber>,
    cache: Cache,
}

impl SummaryService {
    /// Creates a service with the built-in reader, scraper and transcriber.
    pub fn new(model: Arc<dyn LanguageModel>, cache: Cache, config: &Config) -> Result<Self> {
        let timeout = std::time::Duration::from_secs(config.request_timeout);
        Ok(Self {
            model,
            reader: Arc::new(FileTextReader),
            scraper: Arc::new(HttpScraper::new(timeout)?),
            transcriber: Arc::new(WhisperCli::from_config(config)?),
            cache,
        })
    }

    /// Creates a service with Gemini and the built-in collaborators.
    pub fn from_config(config: &Config, cache: Cache) -> Result<Self> {
        let model = Arc::new(GeminiClient::from_config(config)?);
        Self::new(model, cache, config)
    }

    pub fn with_reader(mut self, reader: Arc<dyn DocumentReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_scraper(mut self, scraper: Arc<dyn Scraper>) -> Self {
        self.scraper = scraper;
        self
    }

    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = transcriber;
        self
    }

    /// The cache this service memoizes into.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    async fn generate(&self, prompt: String, empty_message: &str) -> Result<String> {
        let text = self.model.generate(&prompt).await.map_err(|e| {
            warn!("{} failed: {}", self.model.name(), e);
            e
        })?;
        let text = text.trim();
        if text.is_empty() {
            Err(AppError::Service(empty_message.to_string()))
        } else {
            Ok(text.to_string())
        }
    }

    // == Cached Operations ==
    pub async fn summarize_text(&self, text: &str) -> Result<String> {
        self.cache
            .get_or_compute("summarize_text", &(text,), || {
                self.generate(
                    format!("Summarize the following text:\n\n{}", text),
                    "⚠️ Summarization failed.",
                )
            })
            .await
    }

    pub async fn extend_summary(&self, summary: &str) -> Result<String> {
        self.cache
            .get_or_compute("extend_summary", &(summary,), || {
                self.generate(
                    format!(
                        "Expand the following summary into more details:\n\n{}",
                        summary
                    ),
                    "⚠️ Could not extend summary.",
                )
            })
            .await
    }

    pub async fn extend_summary_custom(&self, summary: &str, custom_prompt: &str) -> Result<String> {
        self.cache
            .get_or_compute("extend_summary_custom", &(summary, custom_prompt), || {
                self.generate(
                    format!(
                        "Expand the following summary with specific focus on: {}\n\nSummary:\n{}",
                        custom_prompt, summary
                    ),
                    "⚠️ Could not extend summary with custom details.",
                )
            })
            .await
    }

    pub async fn translate_text(&self, text: &str, target_language: &str) -> Result<String> {
        self.cache
            .get_or_compute("translate_text", &(text, target_language), || {
                self.generate(
                    format!(
                        "Translate the following text into {}:\n\n{}",
                        target_language, text
                    ),
                    "⚠️ Translation failed.",
                )
            })
            .await
    }

    /// Fetches text from a URL: article text for webpages, a transcript for
    /// media.
    pub async fn text_from_url(&self, url: &str, source: SourceKind) -> Result<String> {
        self.cache
            .get_or_compute("get_text_from_url", &(url, source), || async move {
                match source {
                    SourceKind::Webpage => self.article_text(url).await,
                    SourceKind::Media => self.transcriber.transcribe_url(url).await,
                }
            })
            .await
    }

    async fn article_text(&self, url: &str) -> Result<String> {
        let url = normalize_url(url)
            .map_err(|_| AppError::Validation("⚠️ Invalid URL format.".to_string()))?;
        self.cache
            .get_or_compute("extract_article_main_text", &(url.as_str(),), || {
                self.scraper.extract_main_text(url.as_str())
            })
            .await
    }

    // == Uncached Operations ==
    /// Summarizes a document chunk by chunk and joins the partial summaries.
    pub async fn summarize_file(&self, path: &Path) -> Result<String> {
        let text = self.reader.read(path).await?;
        let chunks = chunk_text(&text, CHUNK_WORDS);
        info!("Summarizing {} in {} chunk(s)", path.display(), chunks.len());

        let mut summaries = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let prompt = format!("Summarize the following text:\n\n{}", chunk);
            let summary = self.model.generate(&prompt).await?;
            let summary = summary.trim();
            if !summary.is_empty() {
                summaries.push(summary.to_string());
            }
        }

        if summaries.is_empty() {
            return Err(AppError::Service("⚠️ Summarization failed.".to_string()));
        }
        Ok(summaries.join("\n\n"))
    }

    /// Transcribes a local audio or video file.
    pub async fn transcribe_file(&self, path: &Path) -> Result<String> {
        self.transcriber.transcribe_file(path).await
    }
}
