//! Search result teasers.
//!
//! A [`Teaser`] is the summary the search page shows for one hit: heading,
//! preamble, link, image and whether it sits behind the paywall. The
//! selectors below are scoped to a single result node.

use serde::Serialize;
use time::OffsetDateTime;
use url::Url;

use crate::extract;
use crate::parse::Element;

/// Selects one node per search hit.
pub const RESULTS_SELECTOR: &str = r#"div[class^="teaser "]"#;

/// Link to the full article inside a result node.
pub const LINK_SELECTOR: &str = r#"a[class*="teaser__text-link"]"#;

/// Heading inside a result node.
pub const HEADING_SELECTOR: &str = r#"h2[class*="teaser__heading"]"#;

/// Preamble following the heading.
pub const PREAMBLE_SELECTOR: &str = r#"h2[class*="teaser__heading"] ~ div[class*="teaser__preamble"]"#;

/// Paywall marker, matched against the result node itself.
pub const PREMIUM_SELECTOR: &str = r#"[class*="teaser--premium"]"#;

/// Lazy-loaded teaser image.
pub const IMAGE_SELECTOR: &str = "img[data-src]";

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Teaser {
    /// The teaser heading.
    pub title: String,

    /// Text immediately after the heading.
    pub preamble: String,

    /// Absolute link to the article, empty when the node has none.
    pub url: String,

    /// Absolute image URL.
    pub image: Option<String>,

    pub is_premium: bool,

    /// Date taken from the article URL, `None` when it has no date segment.
    #[serde(with = "time::serde::rfc3339::option")]
    pub published: Option<OffsetDateTime>,

    /// The search query that produced this teaser.
    pub query: String,

    /// When the teaser was seen on the site.
    #[serde(with = "time::serde::rfc3339")]
    pub last_seen: OffsetDateTime,
}

impl Teaser {
    /// Builds a Teaser from one result node.
    ///
    /// Fields are read independently and default on absence; the publish
    /// date is derived from the resolved link.
    pub fn from_element(element: &Element<'_>, base: &Url, query: &str, last_seen: OffsetDateTime) -> Self {
        let url = extract::absolute_url(element, LINK_SELECTOR, "href", base).map(String::from).unwrap_or_default();
        let published = extract::published_from_url(&url);

        Self {
            title: extract::text(element, HEADING_SELECTOR).unwrap_or_default(),
            preamble: extract::text(element, PREAMBLE_SELECTOR).unwrap_or_default(),
            url,
            image: extract::absolute_url(element, IMAGE_SELECTOR, "data-src", base).map(String::from),
            is_premium: extract::has_marker(element, PREMIUM_SELECTOR),
            published,
            query: query.to_string(),
            last_seen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use time::macros::datetime;

    const SEEN: OffsetDateTime = datetime!(2024-01-02 10:00 UTC);

    fn base() -> Url {
        Url::parse("https://www.sydsvenskan.se/").unwrap()
    }

    fn teasers(html: &str) -> Vec<Teaser> {
        let doc = Document::parse(html).unwrap();
        doc.select(RESULTS_SELECTOR)
            .unwrap()
            .iter()
            .map(|node| Teaser::from_element(node, &base(), "pile by", SEEN))
            .collect()
    }

    #[test]
    fn test_teaser_all_fields() {
        let found = teasers(
            r#"<div class="teaser teaser--premium">
                <a class="teaser__text-link" href="/2023-05-17/nyheter/pile-by-stangs"></a>
                <img data-src="/images/pile.jpg">
                <h2 class="teaser__heading"> Pile by stängs </h2>
                <div class="teaser__preamble"> Kommunen tar beslut. </div>
            </div>"#,
        );

        assert_eq!(found.len(), 1);
        let teaser = &found[0];
        assert_eq!(teaser.title, "Pile by stängs");
        assert_eq!(teaser.preamble, "Kommunen tar beslut.");
        assert_eq!(teaser.url, "https://www.sydsvenskan.se/2023-05-17/nyheter/pile-by-stangs");
        assert_eq!(teaser.image.as_deref(), Some("https://www.sydsvenskan.se/images/pile.jpg"));
        assert!(teaser.is_premium);
        assert_eq!(teaser.published, Some(datetime!(2023-05-17 00:00 UTC)));
        assert_eq!(teaser.query, "pile by");
        assert_eq!(teaser.last_seen, SEEN);
    }

    #[test]
    fn test_teaser_missing_fields_default() {
        let found = teasers(r#"<div class="teaser plain"><h2 class="teaser__heading">Bara rubrik</h2></div>"#);

        let teaser = &found[0];
        assert_eq!(teaser.title, "Bara rubrik");
        assert_eq!(teaser.preamble, "");
        assert_eq!(teaser.url, "");
        assert_eq!(teaser.image, None);
        assert!(!teaser.is_premium);
        assert_eq!(teaser.published, None);
    }

    #[test]
    fn test_teaser_url_without_date() {
        let found = teasers(
            r#"<div class="teaser x"><a class="teaser__text-link" href="/nyheter/utan-datum"></a></div>"#,
        );
        assert_eq!(found[0].url, "https://www.sydsvenskan.se/nyheter/utan-datum");
        assert_eq!(found[0].published, None);
    }

    #[test]
    fn test_preamble_must_follow_heading() {
        let found = teasers(
            r#"<div class="teaser x">
                <div class="teaser__preamble">Före rubriken</div>
                <h2 class="teaser__heading">Rubrik</h2>
            </div>"#,
        );
        assert_eq!(found[0].preamble, "");
    }

    #[test]
    fn test_results_selector_requires_teaser_prefix() {
        let found = teasers(
            r#"<div class="teaser a"></div>
               <div class="teaser-list"></div>
               <div class="big teaser b"></div>
               <div class="teaser b"></div>"#,
        );
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_fields_are_scoped_to_result_node() {
        let found = teasers(
            r#"<div class="teaser a">
                   <a class="teaser__text-link" href="/2023-01-01/forsta"></a>
                   <h2 class="teaser__heading">Första</h2>
               </div>
               <div class="teaser b">
                   <a class="teaser__text-link" href="/2023-02-02/andra"></a>
                   <h2 class="teaser__heading">Andra</h2>
               </div>"#,
        );

        assert_eq!(found[0].title, "Första");
        assert_eq!(found[1].title, "Andra");
        assert_eq!(found[1].url, "https://www.sydsvenskan.se/2023-02-02/andra");
        assert_eq!(found[1].published, Some(datetime!(2023-02-02 00:00 UTC)));
    }

    #[test]
    fn test_teaser_serialization() {
        let found = teasers(r#"<div class="teaser x"><h2 class="teaser__heading">T</h2></div>"#);
        let json = serde_json::to_value(&found[0]).unwrap();

        assert_eq!(json["title"], "T");
        assert_eq!(json["is_premium"], false);
        assert!(json["published"].is_null());
        assert_eq!(json["last_seen"], "2024-01-02T10:00:00Z");
    }
}
