//! The "Nyhetsdygnet" collector.
//!
//! One fetch, one page, every article on it. Either the whole list comes back
//! or an error does.

use tracing::{info, instrument, warn};

use crate::article::{ARTICLES_SELECTOR, Article};
use crate::config::SiteConfig;
use crate::fetch::fetch_url;
use crate::parse::Document;
use crate::Result;

/// Fetches the news day listing with the default site configuration.
///
/// # Example
///
/// ```rust,no_run
/// # async fn run() -> sydsvenskan_core::Result<()> {
/// for article in sydsvenskan_core::fetch_newsday_feed().await? {
///     println!("{} {}", article.title, article.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_newsday_feed() -> Result<Vec<Article>> {
    fetch_newsday_feed_with_config(&SiteConfig::default()).await
}

/// Fetches the news day listing using `config`.
///
/// An empty listing is returned as an empty list, not an error.
#[instrument(level = "info", skip_all, fields(url = %config.newsday_url))]
pub async fn fetch_newsday_feed_with_config(config: &SiteConfig) -> Result<Vec<Article>> {
    let html = fetch_url(&config.newsday_url, &config.fetch).await.inspect_err(|e| {
        warn!(error = %e, "Could not load news day listing");
    })?;

    let feed = parse_newsday_page(&html, config)?;
    info!(count = feed.len(), "Collected news day articles");

    Ok(feed)
}

/// Extracts every listing entry from an already fetched page, in document order.
pub fn parse_newsday_page(html: &str, config: &SiteConfig) -> Result<Vec<Article>> {
    let doc = Document::parse(html)?;
    let feed = doc
        .select(ARTICLES_SELECTOR)?
        .iter()
        .map(|node| Article::from_element(node, &config.base_url))
        .collect();

    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
            <article data-article-title="Ett" data-article-path="/2023-05-17/ett">
                <time datetime="2023-05-17T06:00:00.000Z"></time>
            </article>
            <article data-article-title="Två" data-article-path="/2023-05-17/tva"></article>
            <article data-article-title="Tre"></article>
        </body></html>
    "#;

    #[test]
    fn test_parse_newsday_page_document_order() {
        let feed = parse_newsday_page(LISTING, &SiteConfig::default()).unwrap();

        let titles: Vec<&str> = feed.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Ett", "Två", "Tre"]);
        assert_eq!(feed[1].url, "https://www.sydsvenskan.se/2023-05-17/tva");
        assert!(feed[0].time.is_some());
        assert!(feed[1].time.is_none());
        assert_eq!(feed[2].url, "");
    }

    #[test]
    fn test_parse_newsday_page_empty() {
        let feed = parse_newsday_page("<html><body><p>Inga artiklar</p></body></html>", &SiteConfig::default());
        assert!(feed.unwrap().is_empty());
    }

    #[test]
    fn test_parse_newsday_page_uses_configured_base() {
        let config = SiteConfig::builder().base_url("http://localhost:9000").build().unwrap();
        let feed = parse_newsday_page(LISTING, &config).unwrap();
        assert_eq!(feed[0].url, "http://localhost:9000/2023-05-17/ett");
    }
}
