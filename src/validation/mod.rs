//! Validation Module
//!
//! Pre-flight checks that reject bad input before any costed service call.
//! Every check is side-effect free and returns a [`Validation`].

mod file;
mod language;
mod prompt;
mod text;
mod url;

use serde::Serialize;

use crate::error::{AppError, Result};

pub(crate) use file::extension_of;
pub use file::{
    estimate_processing_time, file_type_info, validate_file_input, validate_media_file, FileKind,
    FileTypeInfo, MEDIA_EXTENSIONS, TEXT_EXTENSIONS,
};
pub use language::{is_supported_language, supported_languages, validate_language};
pub use prompt::validate_custom_prompt;
pub use text::validate_text_input;
pub use url::{normalize_url, validate_url};

// == Public Constants ==
/// Minimum text length in characters, counted after trimming
pub const MIN_TEXT_LENGTH: usize = 10;

/// Maximum text length in characters
pub const MAX_TEXT_LENGTH: usize = 1_000_000;

/// Maximum file size in bytes
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024; // 50 MB

/// Maximum URL length in characters
pub const MAX_URL_LENGTH: usize = 2048;

/// Minimum custom prompt length in characters, counted after trimming
pub const MIN_PROMPT_LENGTH: usize = 5;

/// Maximum custom prompt length in characters
pub const MAX_PROMPT_LENGTH: usize = 500;

// == Validation ==
/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub is_valid: bool,
    /// Human-readable explanation, shown to the user verbatim on failure
    pub message: String,
    /// Lowercased extension with leading dot, set by file checks on success
    pub extension: Option<String>,
}

impl Validation {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
            extension: None,
        }
    }

    pub fn pass_with_extension(message: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
            extension: Some(extension.into()),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            extension: None,
        }
    }

    /// Converts a failed check into [`AppError::Validation`].
    pub fn check(self) -> Result<Self> {
        if self.is_valid {
            Ok(self)
        } else {
            Err(AppError::Validation(self.message))
        }
    }
}

/// Formats a count with comma thousands separators.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_passes_through_success() {
        let v = Validation::pass_with_extension("ok", ".txt").check().unwrap();
        assert_eq!(v.extension.as_deref(), Some(".txt"));
    }

    #[test]
    fn test_check_turns_failure_into_error() {
        let err = Validation::fail("⚠️ nope").check().unwrap_err();
        assert_eq!(err, AppError::Validation("⚠️ nope".to_string()));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
        assert_eq!(group_thousands(123_456), "123,456");
    }
}
