//! Text input checks.

use std::collections::HashSet;

use super::{group_thousands, Validation, MAX_TEXT_LENGTH, MIN_TEXT_LENGTH};

/// Word count above which the repetition check applies
const REPETITION_MIN_WORDS: usize = 10;

/// Minimum share of distinct words in a long enough text
const MIN_UNIQUE_WORD_RATIO: f64 = 0.3;

/// Validates text before summarization.
pub fn validate_text_input(text: &str) -> Validation {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Validation::fail("⚠️ Text input is required.");
    }

    if trimmed.chars().count() < MIN_TEXT_LENGTH {
        return Validation::fail(format!(
            "⚠️ Text must be at least {} characters long.",
            MIN_TEXT_LENGTH
        ));
    }

    if text.chars().count() > MAX_TEXT_LENGTH {
        return Validation::fail(format!(
            "⚠️ Text is too long. Maximum {} characters allowed.",
            group_thousands(MAX_TEXT_LENGTH)
        ));
    }

    let words: Vec<&str> = trimmed.split_whitespace().collect();
    if words.len() > REPETITION_MIN_WORDS {
        let unique: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        if (unique.len() as f64) / (words.len() as f64) < MIN_UNIQUE_WORD_RATIO {
            return Validation::fail("⚠️ Text appears to have excessive repetition.");
        }
    }

    Validation::pass("Valid text input.")
}
