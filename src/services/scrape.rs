//! Web page text extraction.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::services::document::{extract_paragraphs, html_to_text};
use crate::services::Scraper;

/// Fetches a page over HTTP and keeps its paragraph text.
///
/// Pages without `<p>` elements fall back to all visible text.
#[derive(Debug, Clone)]
pub struct HttpScraper {
    client: Client,
}

impl HttpScraper {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sume/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn extract_main_text(&self, url: &str) -> Result<String> {
        debug!("Fetching article from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Article download failed for {}: {}", url, e);
            AppError::Service("⚠️ Could not download content from URL.".to_string())
        })?;

        if !response.status().is_success() {
            warn!("Article download for {} returned {}", url, response.status());
            return Err(AppError::Service(format!(
                "⚠️ Could not download content from URL (HTTP {}).",
                response.status().as_u16()
            )));
        }

        let html = response.text().await?;
        let paragraphs = extract_paragraphs(&html);
        let text = if paragraphs.is_empty() {
            html_to_text(&html)
        } else {
            paragraphs.join("\n\n")
        };

        if text.trim().is_empty() {
            Err(AppError::Service(
                "⚠️ No main text found in the webpage.".to_string(),
            ))
        } else {
            Ok(text)
        }
    }
}
