//! Speech-to-text through the external `whisper` command.
//!
//! Media URLs are downloaded into a temporary directory first: YouTube links
//! through `yt-dlp`, anything else with a plain HTTP GET. The directory is
//! removed when transcription finishes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::Transcriber;
use crate::validation::{extension_of, normalize_url, MAX_FILE_SIZE};

/// Runs the `whisper` CLI and reads back its text output.
#[derive(Debug, Clone)]
pub struct WhisperCli {
    program: String,
    model: String,
    yt_dlp: String,
    max_download_bytes: u64,
    client: Client,
}

impl WhisperCli {
    pub fn new(model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            program: "whisper".to_string(),
            model: model.into(),
            yt_dlp: "yt-dlp".to_string(),
            max_download_bytes: MAX_FILE_SIZE,
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.whisper_model.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Overrides the whisper executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Overrides the yt-dlp executable.
    pub fn with_yt_dlp(mut self, program: impl Into<String>) -> Self {
        self.yt_dlp = program.into();
        self
    }

    /// Overrides the size cap for direct media downloads.
    pub fn with_max_download_bytes(mut self, bytes: u64) -> Self {
        self.max_download_bytes = bytes;
        self
    }

    fn too_large(&self) -> AppError {
        AppError::Service(format!(
            "⚠️ Media file is too large. Maximum {}MB allowed.",
            self.max_download_bytes / (1024 * 1024)
        ))
    }

    async fn download_direct(&self, url: &str, dir: &Path) -> Result<PathBuf> {
        let ext = normalize_url(url)
            .ok()
            .map(|u| extension_of(Path::new(u.path())))
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| ".mp3".to_string());
        let target = dir.join(format!("audio{}", ext));

        let mut response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Service(format!(
                "⚠️ Could not download media file, HTTP {}",
                response.status().as_u16()
            )));
        }

        if response
            .content_length()
            .is_some_and(|len| len > self.max_download_bytes)
        {
            return Err(self.too_large());
        }

        // Content-Length can be absent or wrong, so count what arrives too
        let mut written: u64 = 0;
        let mut file = tokio::fs::File::create(&target).await?;
        while let Some(chunk) = response.chunk().await? {
            written += chunk.len() as u64;
            if written > self.max_download_bytes {
                return Err(self.too_large());
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        Ok(target)
    }

    async fn download_with_yt_dlp(&self, url: &str, dir: &Path) -> Result<PathBuf> {
        let template = dir.join("%(title)s.%(ext)s");
        let output = Command::new(&self.yt_dlp)
            .args([
                "--format",
                "bestaudio[ext=m4a]/bestaudio/best",
                "--extract-audio",
                "--audio-format",
                "mp3",
                "--audio-quality",
                "192K",
                "--socket-timeout",
                "30",
                "--retries",
                "3",
                "--quiet",
                "--no-warnings",
                "--output",
            ])
            .arg(&template)
            .arg(url)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                AppError::Service(format!("⚠️ Audio download error: could not run {}: {}", self.yt_dlp, e))
            })?;

        if !output.status.success() {
            return Err(AppError::Service(format!(
                "⚠️ Audio download error: {}",
                last_line(&output.stderr)
            )));
        }

        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if matches!(extension_of(&path).as_str(), ".mp3" | ".m4a" | ".webm") {
                return Ok(path);
            }
        }
        Err(AppError::Service(
            "⚠️ No audio file found after download".to_string(),
        ))
    }
}

#[async_trait]
impl Transcriber for WhisperCli {
    async fn transcribe_file(&self, path: &Path) -> Result<String> {
        let out_dir = TempDir::new()?;
        debug!("Running {} on {}", self.program, path.display());

        let output = Command::new(&self.program)
            .arg(path)
            .args(["--model", self.model.as_str(), "--output_format", "txt", "--output_dir"])
            .arg(out_dir.path())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                error!("Could not start {}: {}", self.program, e);
                AppError::Service(format!("⚠️ Speech-to-text failed: could not run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            error!("{} exited with {}", self.program, output.status);
            return Err(AppError::Service(format!(
                "⚠️ Speech-to-text failed: {}",
                last_line(&output.stderr)
            )));
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let transcript_path = out_dir.path().join(format!("{}.txt", stem));
        let transcript = tokio::fs::read_to_string(&transcript_path)
            .await
            .map_err(|e| AppError::Service(format!("⚠️ Speech-to-text failed: {}", e)))?;

        let transcript = transcript.trim();
        if transcript.is_empty() {
            Err(AppError::Service(
                "⚠️ Could not recognize speech.".to_string(),
            ))
        } else {
            Ok(transcript.to_string())
        }
    }

    async fn transcribe_url(&self, url: &str) -> Result<String> {
        let dir = TempDir::new()?;
        let file = if is_youtube(url) {
            self.download_with_yt_dlp(url, dir.path()).await?
        } else {
            self.download_direct(url, dir.path()).await?
        };
        info!("Downloaded media from {} to {}", url, file.display());

        self.transcribe_file(&file).await
    }
}

fn is_youtube(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

fn last_line(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    text.lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("process exited with an error")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whisper(program: &str) -> WhisperCli {
        WhisperCli::new("base", Duration::from_secs(5))
            .unwrap()
            .with_program(program)
    }

    #[test]
    fn test_is_youtube() {
        assert!(is_youtube("https://www.youtube.com/watch?v=abc"));
        assert!(is_youtube("https://youtu.be/abc"));
        assert!(!is_youtube("https://example.com/talk.mp3"));
    }

    #[test]
    fn test_last_line() {
        assert_eq!(last_line(b"warning\nRuntimeError: bad file\n\n"), "RuntimeError: bad file");
        assert_eq!(last_line(b""), "process exited with an error");
    }

    #[tokio::test]
    async fn test_missing_program_is_a_service_error() {
        let err = whisper("definitely-not-a-real-whisper-binary")
            .transcribe_file(Path::new("talk.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Service(ref m) if m.starts_with("⚠️ Speech-to-text failed")));
    }

    // `sh <input> --model base --output_format txt --output_dir DIR` runs the
    // input file as a script, which stands in for whisper here.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_reads_transcript_written_by_program() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("talk.mp3");
        std::fs::write(&input, "printf '  hello from whisper \\n' > \"$6/talk.txt\"\n").unwrap();

        let text = whisper("sh").transcribe_file(&input).await.unwrap();
        assert_eq!(text, "hello from whisper");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_blank_transcript() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("silence.wav");
        std::fs::write(&input, "printf '   ' > \"$6/silence.txt\"\n").unwrap();

        let err = whisper("sh").transcribe_file(&input).await.unwrap_err();
        assert_eq!(err, AppError::Service("⚠️ Could not recognize speech.".to_string()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcribe_url_downloads_then_transcribes() {
        use axum::{http::StatusCode, routing::get, Router};

        let router = Router::new()
            .route(
                "/clip.mp3",
                get(|| async { "printf 'downloaded speech' > \"$6/audio.txt\"\n" }),
            )
            .route("/gone.mp3", get(|| async { StatusCode::GONE }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let cli = whisper("sh");
        let text = cli
            .transcribe_url(&format!("http://{}/clip.mp3", addr))
            .await
            .unwrap();
        assert_eq!(text, "downloaded speech");

        let err = cli
            .transcribe_url(&format!("http://{}/gone.mp3", addr))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AppError::Service("⚠️ Could not download media file, HTTP 410".to_string())
        );
    }

    #[tokio::test]
    async fn test_direct_download_is_capped() {
        use axum::{body::Body, routing::get, Router};
        use futures::stream;

        let router = Router::new()
            .route("/big.mp3", get(|| async { vec![0u8; 4096] }))
            .route(
                "/streamed.mp3",
                get(|| async {
                    let chunks = (0..8).map(|_| Ok::<_, std::io::Error>(vec![0u8; 1024]));
                    Body::from_stream(stream::iter(chunks))
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        // whisper must never run, so point it at something that cannot start
        let cli = whisper("definitely-not-a-real-whisper-binary").with_max_download_bytes(2048);
        for path in ["big.mp3", "streamed.mp3"] {
            let err = cli
                .transcribe_url(&format!("http://{}/{}", addr, path))
                .await
                .unwrap_err();
            assert!(
                matches!(err, AppError::Service(ref m) if m.starts_with("⚠️ Media file is too large")),
                "{}: {:?}",
                path,
                err
            );
        }
    }
}
