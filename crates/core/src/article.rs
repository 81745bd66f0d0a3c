//! News day listing entries.
//!
//! This module defines the [`Article`] record produced for every
//! `<article>` node on the "Nyhetsdygnet" page, and the builder that fills it
//! from the node's data attributes.

use serde::Serialize;
use time::OffsetDateTime;
use url::Url;

use crate::extract;
use crate::parse::Element;

/// Selects one listing entry per article on the news day page.
pub const ARTICLES_SELECTOR: &str = "article";

/// Attribute on the article node holding the headline.
pub const ARTICLE_TITLE_ATTR: &str = "data-article-title";

/// Attribute on the article node holding the relative article path.
pub const ARTICLE_PATH_ATTR: &str = "data-article-path";

/// Direct child of the article node carrying the timestamp.
pub const ARTICLE_TIME_TAG: &str = "time";

/// Attribute on [`ARTICLE_TIME_TAG`] holding the timestamp.
pub const ARTICLE_TIME_ATTR: &str = "datetime";

/// One entry from the news day listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Headline, empty when the node has none.
    pub title: String,

    /// Absolute article URL, empty when the node has no path.
    pub url: String,

    /// Publication time, `None` when missing or not in the listing format.
    #[serde(with = "time::serde::rfc3339::option")]
    pub time: Option<OffsetDateTime>,
}

impl Article {
    /// Builds an Article from one listing node.
    ///
    /// Every field is read independently; a missing attribute leaves only that
    /// field at its default.
    pub fn from_element(element: &Element<'_>, base: &Url) -> Self {
        let title = extract::own_attr(element, ARTICLE_TITLE_ATTR).unwrap_or_default();

        let url = extract::own_attr(element, ARTICLE_PATH_ATTR)
            .and_then(|path| extract::resolve(base, &path))
            .map(String::from)
            .unwrap_or_default();

        let time = element
            .child(ARTICLE_TIME_TAG)
            .and_then(|el| el.attr(ARTICLE_TIME_ATTR))
            .and_then(extract::parse_listing_time);

        Self { title, url, time }
    }
}
