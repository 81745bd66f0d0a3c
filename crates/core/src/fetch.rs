//! Page fetching over HTTP.
//!
//! This module retrieves the HTML of listing and search pages. It is the only
//! place that talks to the network; everything downstream works on the
//! returned strings.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::{Result, SydsvenskanError};

/// HTTP client configuration for fetching web pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Sydsvenskan/0.1)".to_string() }
    }
}

/// Fetches HTML content from a URL.
///
/// Performs a GET request and returns the response body as text. Redirects
/// are followed, the configured timeout applies to the whole request, and any
/// non-success status is reported as [`SydsvenskanError::HttpStatus`].
#[instrument(level = "debug", skip_all, fields(%url))]
pub async fn fetch_url(url: &Url, config: &FetchConfig) -> Result<String> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SydsvenskanError::InvalidUrl(format!(
            "{}: URL must use http:// or https://",
            url
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(SydsvenskanError::HttpError)?;

    let response = client
        .get(url.clone())
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "sv-SE,sv;q=0.9,en;q=0.8")
        .send()
        .await
        .map_err(|e| map_transport_error(e, config))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SydsvenskanError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    let content = response.text().await.map_err(|e| map_transport_error(e, config))?;
    debug!(bytes = content.len(), "Fetched page");

    Ok(content)
}

fn map_transport_error(e: reqwest::Error, config: &FetchConfig) -> SydsvenskanError {
    if e.is_timeout() { SydsvenskanError::Timeout { timeout: config.timeout } } else { SydsvenskanError::HttpError(e) }
}
