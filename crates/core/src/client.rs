//! The [`Sydsvenskan`] client.
//!
//! A thin handle around a [`SiteConfig`] so callers that talk to a mirror or a
//! local fixture server don't have to pass the config to every call.

use crate::Result;
use crate::article::Article;
use crate::config::SiteConfig;
use crate::newsday::{fetch_newsday_feed_with_config, parse_newsday_page};
use crate::search::{ResultsPage, SearchStream, search_with_config};

/// Client for the news day listing and site search.
#[derive(Debug, Clone, Default)]
pub struct Sydsvenskan {
    config: SiteConfig,
}

impl Sydsvenskan {
    /// Creates a client for the live site.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sydsvenskan_core::Sydsvenskan;
    ///
    /// let client = Sydsvenskan::new();
    /// assert_eq!(client.config().base_url.as_str(), "https://www.sydsvenskan.se/");
    /// ```
    pub fn new() -> Self {
        Self { config: SiteConfig::default() }
    }

    /// Creates a client with a custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sydsvenskan_core::{SiteConfig, Sydsvenskan};
    ///
    /// let config = SiteConfig::builder().base_url("http://localhost:8080").timeout(5).build().unwrap();
    /// let client = Sydsvenskan::with_config(config);
    /// assert_eq!(client.config().fetch.timeout, 5);
    /// ```
    pub fn with_config(config: SiteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Fetches every article on the news day listing.
    pub async fn fetch_newsday_feed(&self) -> Result<Vec<Article>> {
        fetch_newsday_feed_with_config(&self.config).await
    }

    /// Starts a paginated search. Each call is an independent session.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn search(&self, query: &str) -> SearchStream {
        search_with_config(query, self.config.clone())
    }

    /// Extracts a listing page that was fetched elsewhere.
    pub fn parse_newsday(&self, html: &str) -> Result<Vec<Article>> {
        parse_newsday_page(html, &self.config)
    }

    /// Extracts a results page that was fetched elsewhere.
    pub fn parse_results(&self, html: &str, query: &str) -> Result<ResultsPage> {
        ResultsPage::parse(html, query, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[test]
    fn test_parse_uses_client_base() {
        let config = SiteConfig::builder().base_url("http://mirror.local").build().unwrap();
        let client = Sydsvenskan::with_config(config);

        let feed = client
            .parse_newsday(r#"<article data-article-title="A" data-article-path="/x"></article>"#)
            .unwrap();
        assert_eq!(feed[0].url, "http://mirror.local/x");

        let page = client
            .parse_results(r#"<div class="teaser x"><a class="teaser__text-link" href="/y"></a></div>"#, "q")
            .unwrap();
        assert_eq!(page.teasers[0].url, "http://mirror.local/y");
        assert_eq!(page.teasers[0].query, "q");
    }

    #[tokio::test]
    async fn test_client_newsday_and_search() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/nyhetsdygnet/")
            .with_status(200)
            .with_body(r#"<article data-article-title="Ett" data-article-path="/2023-05-17/ett"></article>"#)
            .create_async()
            .await;
        server
            .mock("GET", "/sok")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "ett".into()))
            .with_status(200)
            .with_body(r#"<div class="teaser x"><h2 class="teaser__heading">Ett</h2></div>"#)
            .create_async()
            .await;

        let client = Sydsvenskan::with_config(SiteConfig::builder().base_url(server.url()).build().unwrap());

        let feed = client.fetch_newsday_feed().await.unwrap();
        assert_eq!(feed.len(), 1);

        let hits: Vec<_> = client.search("ett").collect().await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].as_ref().unwrap().title, "Ett");
    }
}
