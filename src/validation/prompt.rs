//! Custom prompt checks.

use super::{Validation, MAX_PROMPT_LENGTH, MIN_PROMPT_LENGTH};

/// Validates the focus prompt used to extend a summary.
pub fn validate_custom_prompt(prompt: &str) -> Validation {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Validation::fail("⚠️ Custom prompt is required.");
    }

    if trimmed.chars().count() < MIN_PROMPT_LENGTH {
        return Validation::fail(format!(
            "⚠️ Custom prompt must be at least {} characters long.",
            MIN_PROMPT_LENGTH
        ));
    }

    if prompt.chars().count() > MAX_PROMPT_LENGTH {
        return Validation::fail(format!(
            "⚠️ Custom prompt is too long. Maximum {} characters allowed.",
            MAX_PROMPT_LENGTH
        ));
    }

    Validation::pass("Valid custom prompt.")
}
