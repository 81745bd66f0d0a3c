//! Site endpoints and request settings.
//!
//! [`SiteConfig`] is an immutable value holding the base URL every relative
//! link is resolved against, the news day listing URL and the search URL
//! template. Each search session gets its own clone.
//!
//! # Example
//!
//! ```rust
//! use sydsvenskan_core::SiteConfig;
//!
//! let config = SiteConfig::builder()
//!     .base_url("http://127.0.0.1:8080/")
//!     .timeout(10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.newsday_url.as_str(), "http://127.0.0.1:8080/nyhetsdygnet/");
//! assert_eq!(config.search_url("pile by").unwrap().as_str(), "http://127.0.0.1:8080/sok?q=pile+by");
//! ```

use url::Url;
use url::form_urlencoded;

use crate::fetch::FetchConfig;
use crate::{Result, SydsvenskanError};

/// Site root all relative links are resolved against.
pub const DEFAULT_BASE_URL: &str = "https://www.sydsvenskan.se/";

/// The "Nyhetsdygnet" listing page.
pub const DEFAULT_NEWSDAY_URL: &str = "https://www.sydsvenskan.se/nyhetsdygnet/";

/// Search endpoint; `{query}` is replaced by the form-escaped query text.
pub const DEFAULT_SEARCH_URL_TEMPLATE: &str = "https://www.sydsvenskan.se/sok?q={query}";

/// Placeholder substituted in [`SiteConfig::search_url_template`].
pub const QUERY_PLACEHOLDER: &str = "{query}";

const NEWSDAY_PATH: &str = "nyhetsdygnet/";
const SEARCH_PATH: &str = "sok?q={query}";

/// Endpoints and fetch settings for one site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Base URL for resolving relative links.
    pub base_url: Url,
    /// Listing page fetched by the news day collector.
    pub newsday_url: Url,
    /// Search URL template containing [`QUERY_PLACEHOLDER`].
    pub search_url_template: String,
    /// HTTP settings shared by every request.
    pub fetch: FetchConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            newsday_url: Url::parse(DEFAULT_NEWSDAY_URL).expect("default news day URL is valid"),
            search_url_template: DEFAULT_SEARCH_URL_TEMPLATE.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Creates a new builder for SiteConfig.
    pub fn builder() -> SiteConfigBuilder {
        SiteConfigBuilder::new()
    }

    /// Builds the first results page URL for `query`.
    ///
    /// The query is form-escaped, so spaces become `+`.
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let escaped: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let raw = self.search_url_template.replace(QUERY_PLACEHOLDER, &escaped);
        Url::parse(&raw).map_err(|e| SydsvenskanError::InvalidUrl(format!("{}: {}", raw, e)))
    }
}

/// Builder for SiteConfig.
///
/// Endpoints that are not set explicitly are derived from the base URL.
#[derive(Debug, Clone, Default)]
pub struct SiteConfigBuilder {
    base_url: Option<String>,
    newsday_url: Option<String>,
    search_url_template: Option<String>,
    fetch: FetchConfig,
}

impl SiteConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL. A trailing slash is added when missing.
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = Some(value.into());
        self
    }

    /// Sets the listing page URL.
    pub fn newsday_url(mut self, value: impl Into<String>) -> Self {
        self.newsday_url = Some(value.into());
        self
    }

    /// Sets the search URL template.
    pub fn search_url_template(mut self, value: impl Into<String>) -> Self {
        self.search_url_template = Some(value.into());
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.fetch.timeout = value;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.fetch.user_agent = value.into();
        self
    }

    /// Builds the config, validating every endpoint.
    pub fn build(self) -> Result<SiteConfig> {
        let base_url = match self.base_url {
            Some(raw) => {
                let raw = if raw.ends_with('/') { raw } else { format!("{}/", raw) };
                parse_endpoint("base URL", &raw)?
            }
            None => parse_endpoint("base URL", DEFAULT_BASE_URL)?,
        };

        let newsday_url = match self.newsday_url {
            Some(raw) => parse_endpoint("news day URL", &raw)?,
            None => base_url
                .join(NEWSDAY_PATH)
                .map_err(|e| SydsvenskanError::ConfigError(format!("news day URL: {}", e)))?,
        };

        let search_url_template = match self.search_url_template {
            Some(template) => template,
            None => format!("{}{}", base_url, SEARCH_PATH),
        };

        if !search_url_template.contains(QUERY_PLACEHOLDER) {
            return Err(SydsvenskanError::ConfigError(format!(
                "search URL template '{}' has no {} placeholder",
                search_url_template, QUERY_PLACEHOLDER
            )));
        }

        Ok(SiteConfig { base_url, newsday_url, search_url_template, fetch: self.fetch })
    }
}

fn parse_endpoint(name: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| SydsvenskanError::ConfigError(format!("{} '{}': {}", name, raw, e)))?;

    if url.cannot_be_a_base() {
        return Err(SydsvenskanError::ConfigError(format!("{} '{}' cannot be a base", name, raw)));
    }

    Ok(url)
}
