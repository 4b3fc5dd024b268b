//! Error types for the viewer.
//!
//! One crate-wide error enum for library consumers, with a `Result` alias.
//! The render pass itself never produces these: malformed subtrees degrade to
//! empty output with a logged warning, so errors only occur at the edges
//! (reading input, parsing XML, writing output, fetching over HTTP).

use thiserror::Error;

/// Main error type for the viewer library.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Invalid language tag.
    #[error("Invalid language tag: '{0}'. Expected a BCP-47 style tag (e.g., en, fr, pt-BR)")]
    InvalidLanguage(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download a document.
    #[error("Failed to download document from {url}: {source}")]
    DocumentDownload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// All download attempts failed.
    #[error("Download failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Response body exceeded the configured size cap.
    #[error("Response from {url} exceeded {limit} bytes")]
    ResponseTooLarge { url: String, limit: u64 },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required document structure.
    #[error("Missing document element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for viewer operations.
pub type Result<T> = std::result::Result<T, ViewerError>;
