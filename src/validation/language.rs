//! Target language checks.

use super::Validation;

/// Languages offered for translation.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "Afrikaans", "Albanian", "Amharic", "Arabic", "Armenian", "Azerbaijani", "Basque",
    "Belarusian", "Bengali", "Bosnian", "Bulgarian", "Catalan",
    "Chinese (Simplified)", "Chinese (Traditional)", "Croatian", "Czech", "Danish",
    "Dutch", "English", "Estonian", "Filipino", "Finnish", "French", "Galician",
    "Georgian", "German", "Greek", "Gujarati", "Haitian Creole", "Hausa", "Hebrew",
    "Hindi", "Hungarian", "Icelandic", "Igbo", "Indonesian", "Irish", "Italian",
    "Japanese", "Kannada", "Kazakh", "Khmer", "Korean", "Kurdish", "Lao",
    "Latvian", "Lithuanian", "Luxembourgish", "Macedonian", "Malay", "Malayalam",
    "Maltese", "Marathi", "Mongolian", "Nepali", "Norwegian", "Pashto", "Persian",
    "Polish", "Portuguese", "Punjabi", "Romanian", "Russian", "Scots Gaelic",
    "Serbian", "Sinhala", "Slovak", "Slovenian", "Somali", "Spanish", "Swahili",
    "Swedish", "Tajik", "Tamil", "Tatar", "Telugu", "Thai", "Turkish",
    "Turkmen", "Ukrainian", "Urdu", "Uzbek", "Vietnamese", "Welsh", "Xhosa",
    "Yoruba", "Zulu",
];

/// Characters never allowed in a custom language name
const FORBIDDEN_CHARS: &[char] = &['<', '>', '"', '\''];

/// Returns the fixed list of supported language names.
pub fn supported_languages() -> &'static [&'static str] {
    SUPPORTED_LANGUAGES
}

/// Case-insensitive membership test against the supported list.
pub fn is_supported_language(language: &str) -> bool {
    let language = language.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .any(|l| l.eq_ignore_ascii_case(language))
}

/// Validates a translation target.
///
/// Names outside the supported list pass only when `allow_custom` is set, and
/// then only if they look like a plausible language name.
pub fn validate_language(language: &str, allow_custom: bool) -> Validation {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        return Validation::fail("⚠️ Language is required.");
    }

    if is_supported_language(trimmed) {
        return Validation::pass("Valid language input.");
    }

    if !allow_custom {
        return Validation::fail(format!(
            "⚠️ Unsupported language: {}. Choose one from the list or enable a custom language.",
            trimmed
        ));
    }

    let len = trimmed.chars().count();
    if len < 2 {
        return Validation::fail("⚠️ Language name must be at least 2 characters long.");
    }
    if len > 100 {
        return Validation::fail("⚠️ Language name is too long.");
    }
    if trimmed.contains(FORBIDDEN_CHARS) {
        return Validation::fail("⚠️ Language name contains invalid characters.");
    }

    Validation::pass("Valid custom language input.")
}
