//! Error types for Sydsvenskan operations.
//!
//! This module defines the main error type [`SydsvenskanError`] which represents
//! everything that can go wrong while fetching a page, building a request URL,
//! or rendering records.
//!
//! Missing fields inside a page are never errors: record builders fall back to
//! defaults. Only whole-document failures surface here.
//!
//! # Example
//!
//! ```rust
//! use sydsvenskan_core::{SydsvenskanError, Result};
//!
//! fn require_query(query: &str) -> Result<&str> {
//!     if query.trim().is_empty() {
//!         return Err(SydsvenskanError::ConfigError("empty query".to_string()));
//!     }
//!     Ok(query)
//! }
//! ```

use thiserror::Error;

/// Main error type for fetching and extraction operations.
///
/// # Example
///
/// ```rust,no_run
/// use sydsvenskan_core::{SydsvenskanError, fetch_newsday_feed};
///
/// # async fn run() {
/// match fetch_newsday_feed().await {
///     Ok(feed) => println!("{} articles", feed.len()),
///     Err(SydsvenskanError::HttpStatus { status, url }) => {
///         println!("{} answered {}", url, status);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum SydsvenskanError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-success status code.
    #[error("{url} answered with HTTP status {status}")]
    HttpStatus { status: u16, url: String },

    /// Invalid URL provided or produced while resolving a link.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid CSS selector.
    ///
    /// Selectors are compile-time constants, so this only shows up when a
    /// caller passes its own selector to [`Document::select`](crate::Document::select).
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// JSON rendering errors.
    #[error("Failed to serialize records: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Site configuration errors.
    ///
    /// Returned when endpoints or templates in a [`SiteConfig`](crate::SiteConfig) are unusable.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for SydsvenskanError.
pub type Result<T> = std::result::Result<T, SydsvenskanError>;
