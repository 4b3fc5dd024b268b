//! HTTP client wrapper for downloading remote documents.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{DEFAULT_MAX_RESPONSE_SIZE, HTTP_TIMEOUT_SECS};
use crate::error::{Result, ViewerError};

/// User agent string identifying this viewer.
const USER_AGENT: &str = concat!("recto-viewer/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download content from a URL with retry logic.
///
/// Uses exponential backoff for transient failures (network errors, 5xx
/// responses). Responses larger than [`DEFAULT_MAX_RESPONSE_SIZE`] are
/// rejected.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms, 2000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();

                // Retry on server errors (5xx)
                if status.is_server_error() {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }

                // Don't retry client errors (4xx) - they won't succeed
                let response = response.error_for_status()?;

                if let Some(length) = response.content_length() {
                    if length > DEFAULT_MAX_RESPONSE_SIZE {
                        return Err(ViewerError::ResponseTooLarge {
                            url: url.to_string(),
                            limit: DEFAULT_MAX_RESPONSE_SIZE,
                        });
                    }
                }

                let bytes = response.bytes()?;
                if bytes.len() as u64 > DEFAULT_MAX_RESPONSE_SIZE {
                    return Err(ViewerError::ResponseTooLarge {
                        url: url.to_string(),
                        limit: DEFAULT_MAX_RESPONSE_SIZE,
                    });
                }
                return Ok(bytes.to_vec());
            }
            Err(e) => {
                // Retry on connection/timeout errors
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                // Other errors (like invalid URL) - don't retry
                return Err(ViewerError::Http(e));
            }
        }
    }

    // All retries exhausted
    Err(ViewerError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Decode response bytes as UTF-8, lossily if necessary.
///
/// # Arguments
/// * `bytes` - Raw response body
/// * `context` - Description of the content, used in the warning log
#[must_use]
pub fn bytes_to_string(bytes: &[u8], context: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::warn!(context, "Response is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
