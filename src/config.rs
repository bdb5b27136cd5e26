//! Configuration Module
//!
//! Loads service credentials and server settings from environment variables.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Default Gemini model used for summarization and translation
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default Whisper model size, picked for speed
pub const DEFAULT_WHISPER_MODEL: &str = "base";

/// Server and service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the hosted language model
    pub api_key: String,
    /// Optional service-account credentials file
    pub credentials_path: Option<PathBuf>,
    /// Language model identifier
    pub gemini_model: String,
    /// Speech recognition model size passed to whisper
    pub whisper_model: String,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout in seconds for outbound service requests
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GOOGLE_API_KEY` - Language model API key (required)
    /// - `GOOGLE_APPLICATION_CREDENTIALS` - Credentials file path (optional, must exist if set)
    /// - `GEMINI_MODEL` - Model id (default: gemini-2.5-flash)
    /// - `WHISPER_MODEL` - Whisper model size (default: base)
    /// - `SERVER_PORT` - HTTP server port (default: 7860)
    /// - `REQUEST_TIMEOUT` - Outbound request timeout in seconds (default: 120)
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GOOGLE_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Configuration(
                    "GOOGLE_API_KEY is not set. Add it to your environment before starting."
                        .to_string(),
                )
            })?;

        let credentials_path = match env::var("GOOGLE_APPLICATION_CREDENTIALS") {
            Ok(path) if !path.trim().is_empty() => Some(check_credentials(Path::new(&path))?),
            _ => None,
        };

        let defaults = Self::default();
        Ok(Self {
            api_key,
            credentials_path,
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            whisper_model: env::var("WHISPER_MODEL").unwrap_or(defaults.whisper_model),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            request_timeout: env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout),
        })
    }
}

fn check_credentials(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(AppError::Configuration(format!(
            "GOOGLE_APPLICATION_CREDENTIALS points to a missing file: {}",
            path.display()
        )))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            credentials_path: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            whisper_model: DEFAULT_WHISPER_MODEL.to_string(),
            server_port: 7860,
            request_timeout: 120,
        }
    }
}
