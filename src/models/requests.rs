//! Request DTOs for the summarizer API
//!
//! Defines the structure of incoming HTTP request bodies. Each request knows
//! which pre-flight checks it must pass before a service is called.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::services::SourceKind;
use crate::validation::{
    validate_custom_prompt, validate_file_input, validate_language, validate_media_file,
    validate_text_input, validate_url, Validation,
};

/// Request body for POST /summarize
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeTextRequest {
    pub text: String,
}

impl SummarizeTextRequest {
    pub fn validate(&self) -> Result<Validation> {
        validate_text_input(&self.text).check()
    }
}

/// Request body for endpoints taking a path on the server's disk
///
/// POST /summarize/file, POST /transcribe and POST /estimate
#[derive(Debug, Clone, Deserialize)]
pub struct FileRequest {
    pub path: PathBuf,
}

impl FileRequest {
    pub fn validate_document(&self) -> Result<Validation> {
        validate_file_input(&self.path).check()
    }

    pub fn validate_media(&self) -> Result<Validation> {
        validate_media_file(&self.path).check()
    }
}

/// Request body for POST /url
#[derive(Debug, Clone, Deserialize)]
pub struct UrlRequest {
    pub url: String,
    /// Defaults to `Webpage`
    #[serde(default = "default_source")]
    pub source: SourceKind,
}

fn default_source() -> SourceKind {
    SourceKind::Webpage
}

impl UrlRequest {
    pub fn validate(&self) -> Result<Validation> {
        validate_url(&self.url).check()
    }
}

/// Request body for POST /extend
///
/// Without a custom prompt the summary is expanded generally.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendRequest {
    pub summary: String,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

impl ExtendRequest {
    pub fn validate(&self) -> Result<()> {
        if self.summary.trim().is_empty() {
            return Err(AppError::Validation(
                "⚠️ There is no summary to extend yet.".to_string(),
            ));
        }
        if let Some(prompt) = &self.custom_prompt {
            validate_custom_prompt(prompt).check()?;
        }
        Ok(())
    }
}

/// Request body for POST /translate
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub language: String,
    /// Accept a language outside the supported list
    #[serde(default)]
    pub allow_custom: bool,
}

impl TranslateRequest {
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(AppError::Validation(
                "⚠️ There is no text to translate yet.".to_string(),
            ));
        }
        validate_language(&self.language, self.allow_custom).check()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_request_defaults_to_webpage() {
        let req: UrlRequest = serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(req.source, SourceKind::Webpage);

        let req: UrlRequest =
            serde_json::from_str(r#"{"url": "https://example.com/a.mp3", "source": "Media"}"#)
                .unwrap();
        assert_eq!(req.source, SourceKind::Media);
    }

    #[test]
    fn test_summarize_request_validation() {
        let req = SummarizeTextRequest {
            text: "Short.".to_string(),
        };
        let err = req.validate().unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("⚠️ Text must be at least 10 characters long.".to_string())
        );
    }

    #[test]
    fn test_extend_request_validation() {
        let req: ExtendRequest = serde_json::from_str(r#"{"summary": "A summary."}"#).unwrap();
        assert!(req.custom_prompt.is_none());
        assert!(req.validate().is_ok());

        let req = ExtendRequest {
            summary: "A summary.".to_string(),
            custom_prompt: Some("   ".to_string()),
        };
        assert!(req.validate().is_err());

        let req = ExtendRequest {
            summary: " ".to_string(),
            custom_prompt: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_translate_request_validation() {
        let req: TranslateRequest =
            serde_json::from_str(r#"{"text": "Bonjour", "language": "klingon"}"#).unwrap();
        assert!(!req.allow_custom);
        assert!(req.validate().is_err());

        let req = TranslateRequest {
            allow_custom: true,
            ..req
        };
        assert!(req.validate().is_ok());
    }
}
