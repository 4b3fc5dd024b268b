//! Text normalization and escaping for HTML output.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex pattern for whitespace runs (spaces, tabs, newlines).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse whitespace runs to single spaces.
///
/// Pretty-printed XML carries indentation and newlines inside text nodes;
/// rendering treats any run as one space, the way a browser would. Edge
/// whitespace collapses to a single space rather than disappearing, so
/// spacing between inline siblings survives.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").to_string()
}

/// Normalize text for output: Unicode NFC plus whitespace collapsing.
///
/// Keyed and OCR'd sources mix precomposed and combining character forms;
/// NFC keeps rendered text and in-page search consistent.
pub fn normalize_text(text: &str) -> String {
    collapse_whitespace(&text.nfc().collect::<String>())
}

/// Escape text for an HTML text position.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for a double-quoted HTML attribute position.
pub fn escape_attr(text: &str) -> String {
    escape_text(text)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Regex pattern for HTML tags.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Reduce rendered HTML to plain text for terminal display.
///
/// Tags become spaces, entities are unescaped, and whitespace collapses.
/// Only entities this crate emits are handled; this is for showing
/// generated fragments, not for parsing arbitrary HTML.
pub fn strip_tags(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, " ");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    collapse_whitespace(&text).trim().to_string()
}
