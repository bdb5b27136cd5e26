//! File and media checks, plus file-type info and processing estimates.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use super::{Validation, MAX_FILE_SIZE};

/// Document extensions accepted for summarization
pub const TEXT_EXTENSIONS: &[&str] = &[".docx", ".md", ".pdf", ".txt"];

/// Audio/video extensions accepted for transcription
pub const MEDIA_EXTENSIONS: &[&str] = &[".avi", ".m4a", ".mov", ".mp3", ".mp4", ".wav", ".webm"];

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Which allow-list a file is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Media,
}

impl FileKind {
    fn extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Text => TEXT_EXTENSIONS,
            FileKind::Media => MEDIA_EXTENSIONS,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            FileKind::Text => "File",
            FileKind::Media => "Media file",
        }
    }
}

/// Validates a document before text extraction.
pub fn validate_file_input(path: impl AsRef<Path>) -> Validation {
    validate_path(path.as_ref(), FileKind::Text)
}

/// Validates an audio or video file before transcription.
pub fn validate_media_file(path: impl AsRef<Path>) -> Validation {
    validate_path(path.as_ref(), FileKind::Media)
}

fn validate_path(path: &Path, kind: FileKind) -> Validation {
    let noun = kind.noun();
    if path.as_os_str().is_empty() {
        return Validation::fail(format!("⚠️ {} path is required.", noun));
    }

    let metadata = match fs::metadata(path) {
        Ok(m) if m.is_file() => m,
        Ok(_) => return Validation::fail(format!("⚠️ {} does not exist.", noun)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Validation::fail(format!("⚠️ {} does not exist.", noun))
        }
        Err(_) => return Validation::fail(format!("⚠️ Cannot access {}.", noun.to_lowercase())),
    };

    let size = metadata.len();
    if size > MAX_FILE_SIZE {
        return Validation::fail(format!(
            "⚠️ {} is too large. Maximum {}MB allowed.",
            noun,
            MAX_FILE_SIZE / (1024 * 1024)
        ));
    }
    if size == 0 {
        return Validation::fail(format!("⚠️ {} is empty.", noun));
    }

    let ext = extension_of(path);
    if !kind.extensions().contains(&ext.as_str()) {
        let label = match kind {
            FileKind::Text => "file type",
            FileKind::Media => "media type",
        };
        return Validation::fail(format!(
            "⚠️ Unsupported {}: {}. Supported: {}",
            label,
            if ext.is_empty() { "(none)" } else { ext.as_str() },
            kind.extensions().join(", ")
        ));
    }

    let message = match kind {
        FileKind::Text => "Valid file input.",
        FileKind::Media => "Valid media file input.",
    };
    Validation::pass_with_extension(message, ext)
}

/// Lowercased extension with its leading dot, or empty.
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

// == File Type Info ==
/// Size and classification of a file on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileTypeInfo {
    pub size: u64,
    pub extension: String,
    pub is_text: bool,
    pub is_media: bool,
    /// Size in MB rounded to two decimals
    pub size_mb: f64,
}

/// Reads size and extension information for a file.
pub fn file_type_info(path: impl AsRef<Path>) -> io::Result<FileTypeInfo> {
    let path = path.as_ref();
    let size = fs::metadata(path)?.len();
    let extension = extension_of(path);

    Ok(FileTypeInfo {
        size,
        is_text: TEXT_EXTENSIONS.contains(&extension.as_str()),
        is_media: MEDIA_EXTENSIONS.contains(&extension.as_str()),
        extension,
        size_mb: (size as f64 / BYTES_PER_MB * 100.0).round() / 100.0,
    })
}

// == Processing Estimate ==
/// Advisory processing time for a file, from a fixed size lookup.
pub fn estimate_processing_time(path: impl AsRef<Path>) -> &'static str {
    let Ok(info) = file_type_info(path) else {
        return "Unknown";
    };

    if info.is_text {
        match info.size_mb {
            mb if mb < 1.0 => "~5-10 seconds",
            mb if mb < 5.0 => "~10-30 seconds",
            _ => "~30-60 seconds",
        }
    } else if info.is_media {
        match info.size_mb {
            mb if mb < 10.0 => "~30-60 seconds",
            mb if mb < 50.0 => "~1-3 minutes",
            _ => "~3-5 minutes",
        }
    } else {
        "Unknown"
    }
}
