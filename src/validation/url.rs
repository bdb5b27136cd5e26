//! URL checks.

use url::{ParseError, Url};

use super::{Validation, MAX_URL_LENGTH};

/// Substrings that mark a URL as unsafe to fetch
const UNSAFE_PATTERNS: &[&str] = &["javascript:", "data:", "file:"];

/// Validates a URL before scraping or media download.
pub fn validate_url(input: &str) -> Validation {
    let input = input.trim();
    if input.is_empty() {
        return Validation::fail("⚠️ URL is required.");
    }

    if input.chars().count() > MAX_URL_LENGTH {
        return Validation::fail(format!(
            "⚠️ URL is too long. Maximum {} characters allowed.",
            MAX_URL_LENGTH
        ));
    }

    let lowered = input.to_lowercase();
    if UNSAFE_PATTERNS.iter().any(|p| lowered.contains(p)) {
        return Validation::fail("⚠️ URL contains potentially unsafe content.");
    }

    match normalize_url(input) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Validation::pass("Valid URL input."),
        Ok(_) => Validation::fail("⚠️ Only http and https URLs are supported."),
        Err(_) => Validation::fail("⚠️ Invalid URL format."),
    }
}

/// Parses a URL, defaulting a missing scheme to `http://`.
///
/// Fails unless the result has both a scheme and a non-empty host. Input
/// without a scheme must not carry credentials: `mailto:x@y.com` would
/// otherwise read as user `mailto` at host `y.com`.
pub fn normalize_url(input: &str) -> Result<Url, ParseError> {
    let input = input.trim();
    let url = if input.contains("://") {
        Url::parse(input)?
    } else {
        let url = Url::parse(&format!("http://{}", input))?;
        if !url.username().is_empty() || url.password().is_some() {
            return Err(ParseError::EmptyHost);
        }
        url
    };

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(ParseError::EmptyHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_urls_pass() {
        assert!(validate_url("https://example.com/article").is_valid);
        assert!(validate_url("http://news.example.org/a?b=c#d").is_valid);
        assert!(validate_url("  https://example.com  ").is_valid);
    }

    #[test]
    fn test_missing_scheme_defaults_to_http() {
        assert!(validate_url("example.com/article").is_valid);
        assert_eq!(
            normalize_url("example.com/article").unwrap().as_str(),
            "http://example.com/article"
        );
    }

    #[test]
    fn test_malformed_urls_fail() {
        let v = validate_url("not a url");
        assert!(!v.is_valid);
        assert_eq!(v.message, "⚠️ Invalid URL format.");

        assert!(!validate_url("").is_valid);
        assert!(!validate_url("https://").is_valid);
    }

    #[test]
    fn test_schemeless_input_with_credentials_fails() {
        let v = validate_url("mailto:x@y.com");
        assert!(!v.is_valid);
        assert_eq!(v.message, "⚠️ Invalid URL format.");
        assert!(normalize_url("user@example.com/page").is_err());

        // Explicit schemes keep their userinfo
        assert!(validate_url("https://user@example.com/page").is_valid);
    }

    #[test]
    fn test_unsafe_and_unsupported_schemes() {
        assert_eq!(
            validate_url("javascript:alert(1)").message,
            "⚠️ URL contains potentially unsafe content."
        );
        assert!(!validate_url("file:///etc/passwd").is_valid);
        assert!(!validate_url("data:text/html,hi").is_valid);
        assert_eq!(
            validate_url("ftp://example.com/file").message,
            "⚠️ Only http and https URLs are supported."
        );
    }

    #[test]
    fn test_length_limit() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(validate_url(&long).message.contains("too long"));
    }
}
