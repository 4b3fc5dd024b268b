//! Configuration constants and validation functions for the viewer.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, ViewerError};

/// Language used when a document declares none and no request overrides it.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Heading level assigned to a section head at nesting depth 1.
///
/// The document title occupies `h1`, so body sections start at `h2`.
pub const BASE_HEADING_LEVEL: u8 = 2;

/// Deepest heading level emitted; nesting beyond this clamps to `h6`.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// HTTP timeout in seconds.
///
/// Set to 30 seconds to accommodate large full-text XML and slow mirrors.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum HTTP response size in bytes (50 MB).
///
/// TEI articles are rarely above a few megabytes, but full-text corpus
/// exports can be large; the cap keeps a misbehaving server from exhausting
/// memory.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 50 * 1024 * 1024;

/// Wrap width for terminal metadata output.
pub const TEXT_WRAP_WIDTH: usize = 80;

/// Language tag pattern: primary subtag plus optional subtags (BCP-47 shape).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LANGUAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]{2,3}(-[a-zA-Z0-9]{2,8})*$").expect("valid regex"));

/// Validate a language tag.
///
/// # Arguments
/// * `tag` - The language tag to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(ViewerError::InvalidLanguage)` if invalid
///
/// # Examples
/// ```
/// use recto_viewer::config::validate_language;
///
/// assert!(validate_language("en").is_ok());
/// assert!(validate_language("pt-BR").is_ok());
/// assert!(validate_language("english!").is_err());
/// ```
pub fn validate_language(tag: &str) -> Result<()> {
    if LANGUAGE_PATTERN.is_match(tag) {
        Ok(())
    } else {
        Err(ViewerError::InvalidLanguage(tag.to_string()))
    }
}

/// Sanitize text into an anchor identifier for heading links.
///
/// Lowercases, keeps alphanumerics, maps whitespace runs to single hyphens,
/// and drops everything else so anchors stay safe inside `href` fragments.
///
/// # Examples
/// ```
/// use recto_viewer::config::sanitize_anchor;
///
/// assert_eq!(sanitize_anchor("Results and Discussion"), "results-and-discussion");
/// assert_eq!(sanitize_anchor("3.1 Méthodes"), "3.1-méthodes");
/// assert_eq!(sanitize_anchor("<script>"), "script");
/// ```
pub fn sanitize_anchor(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.trim().chars() {
        if c.is_whitespace() {
            pending_hyphen = !anchor.is_empty();
        } else if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
            if pending_hyphen {
                anchor.push('-');
                pending_hyphen = false;
            }
            anchor.extend(c.to_lowercase());
        }
    }

    anchor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_valid() {
        assert!(validate_language("en").is_ok());
        assert!(validate_language("fr").is_ok());
        assert!(validate_language("deu").is_ok());
        assert!(validate_language("pt-BR").is_ok());
        assert!(validate_language("zh-Hant-TW").is_ok());
    }

    #[test]
    fn test_validate_language_invalid() {
        assert!(validate_language("").is_err());
        assert!(validate_language("e").is_err()); // Too short
        assert!(validate_language("english").is_err()); // Primary subtag too long
        assert!(validate_language("en_US").is_err()); // Underscore separator
        assert!(validate_language("en-").is_err()); // Trailing separator
    }

    #[test]
    fn test_sanitize_anchor() {
        assert_eq!(sanitize_anchor("Introduction"), "introduction");
        assert_eq!(sanitize_anchor("Results and Discussion"), "results-and-discussion");
        assert_eq!(sanitize_anchor("  padded   title  "), "padded-title");
        assert_eq!(sanitize_anchor("3.1 Methods"), "3.1-methods");
    }

    #[test]
    fn test_sanitize_anchor_strips_markup() {
        assert_eq!(sanitize_anchor("<script>alert('x')</script>"), "scriptalertxscript");
        assert_eq!(sanitize_anchor("a & b"), "a-b");
    }

    #[test]
    fn test_sanitize_anchor_empty() {
        assert_eq!(sanitize_anchor(""), "");
        assert_eq!(sanitize_anchor("   "), "");
        assert_eq!(sanitize_anchor("!!!"), "");
    }

    #[test]
    fn test_heading_level_bounds() {
        assert!(BASE_HEADING_LEVEL >= 2);
        assert!(MAX_HEADING_LEVEL <= 6);
        assert!(BASE_HEADING_LEVEL <= MAX_HEADING_LEVEL);
    }
}
