//! Remote document downloading.

use reqwest::blocking::Client;

use crate::error::{Result, ViewerError};
use crate::http::{bytes_to_string, download_bytes};

/// Download a TEI document from a URL.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - Document URL
///
/// # Returns
/// Raw XML content as a string
pub fn download_document(client: &Client, url: &str) -> Result<String> {
    let bytes = download_bytes(client, url).map_err(|e| {
        if let ViewerError::Http(source) = e {
            ViewerError::DocumentDownload {
                url: url.to_string(),
                source,
            }
        } else {
            e
        }
    })?;

    Ok(bytes_to_string(&bytes, &format!("document at {url}")))
}
