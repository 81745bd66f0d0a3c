//! Field extractors.
//!
//! Pure functions mapping one element (or a whole document) and a selector to
//! a single value. A missing node yields `None`, never an error, so a record
//! can be built from whatever the page happens to contain.

use regex::Regex;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::trace;
use url::Url;

use crate::parse::{Document, Element};

/// Matches the `YYYY-MM-DD` segment the site embeds in article paths.
pub const DATE_SEGMENT_PATTERN: &str = r"\d{4}-\d{2}-\d{2}";

/// Text of the first descendant matching `selector`, trimmed.
///
/// Empty text still counts as a match and yields `Some("")`.
pub fn text(element: &Element<'_>, selector: &str) -> Option<String> {
    let found = element.select_first(selector);
    if found.is_none() {
        trace!(selector, "No element for text field");
    }
    found.map(|el| el.text().trim().to_string())
}

/// Value of `name` on the element itself.
pub fn own_attr(element: &Element<'_>, name: &str) -> Option<String> {
    element.attr(name).map(|v| v.trim().to_string())
}

/// Value of `name` on the first descendant matching `selector`.
pub fn attr(element: &Element<'_>, selector: &str, name: &str) -> Option<String> {
    element.select_first(selector).and_then(|el| el.attr(name)).map(|v| v.trim().to_string())
}

/// Resolves the `name` attribute of the first descendant matching `selector`
/// against `base`.
pub fn absolute_url(element: &Element<'_>, selector: &str, name: &str, base: &Url) -> Option<Url> {
    attr(element, selector, name).and_then(|href| resolve(base, &href))
}

/// Resolves an href against `base`, ignoring surrounding whitespace.
///
/// Unparsable hrefs yield `None`.
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    match base.join(href.trim()) {
        Ok(url) => Some(url),
        Err(e) => {
            trace!(href, error = %e, "Could not resolve href");
            None
        }
    }
}

/// Whether the element itself carries the marker matched by `selector`.
///
/// This is a presence check only; nothing is read from the element.
pub fn has_marker(element: &Element<'_>, selector: &str) -> bool {
    element.matches(selector)
}

/// Publish date embedded in a URL path, at midnight UTC.
///
/// Takes the first `YYYY-MM-DD` run anywhere in the URL. Returns `None` when
/// no such run exists or it is not a real calendar date.
pub fn published_from_url(url: &str) -> Option<OffsetDateTime> {
    let pattern = Regex::new(DATE_SEGMENT_PATTERN).ok()?;
    let segment = pattern.find(url)?.as_str();
    parse_date(segment)
}

/// Parses a `YYYY-MM-DD` string to midnight UTC.
pub fn parse_date(value: &str) -> Option<OffsetDateTime> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format).ok().map(|date| date.midnight().assume_utc())
}

/// Parses the listing timestamp format, e.g. `2023-05-17T08:30:00.000Z`.
pub fn parse_listing_time(value: &str) -> Option<OffsetDateTime> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    PrimitiveDateTime::parse(value.trim(), &format).ok().map(|dt| dt.assume_utc())
}

/// Href of the first element in `doc` matching `selector`, resolved against `base`.
///
/// Used for the pagination link, which lives outside any single result node.
pub fn document_link(doc: &Document, selector: &str, base: &Url) -> Option<Url> {
    resolve(base, doc.select_first(selector)?.attr("href")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::datetime;

    const TEASER_HTML: &str = r#"
        <html><body>
            <div class="teaser teaser--premium">
                <a class="teaser__text-link" href="/2023-05-17/nyheter/pile-by"></a>
                <h2 class="teaser__heading">  Pile by  </h2>
                <img data-src="/images/pile.jpg">
                <h3></h3>
            </div>
            <nav class="pagination">
                <a class="pagination__link pagination__link--next" href="/sok?q=pile+by&amp;page=2">Nästa</a>
            </nav>
        </body></html>
    "#;

    fn base() -> Url {
        Url::parse("https://www.sydsvenskan.se/").unwrap()
    }

    #[test]
    fn test_text_trims_and_handles_absence() {
        let doc = Document::parse(TEASER_HTML).unwrap();
        let teaser = doc.select_first("div.teaser").unwrap();

        assert_eq!(text(&teaser, "h2"), Some("Pile by".to_string()));
        assert_eq!(text(&teaser, "h3"), Some(String::new()));
        assert_eq!(text(&teaser, "h4"), None);
    }

    #[test]
    fn test_absolute_url_resolves_against_base() {
        let doc = Document::parse(TEASER_HTML).unwrap();
        let teaser = doc.select_first("div.teaser").unwrap();

        let url = absolute_url(&teaser, "a", "href", &base()).unwrap();
        assert_eq!(url.as_str(), "https://www.sydsvenskan.se/2023-05-17/nyheter/pile-by");

        let image = absolute_url(&teaser, "img", "data-src", &base()).unwrap();
        assert_eq!(image.as_str(), "https://www.sydsvenskan.se/images/pile.jpg");

        assert!(absolute_url(&teaser, "video", "src", &base()).is_none());
    }

    #[test]
    fn test_has_marker() {
        let doc = Document::parse(TEASER_HTML).unwrap();
        let teaser = doc.select_first("div.teaser").unwrap();
        assert!(has_marker(&teaser, "[class*=\"teaser--premium\"]"));
        assert!(!has_marker(&teaser, "[class*=\"teaser--free\"]"));
    }

    #[test]
    fn test_document_link() {
        let doc = Document::parse(TEASER_HTML).unwrap();
        let next = document_link(&doc, "[class^=\"pagination\"] > a[class*=\"pagination__link--next\"]", &base());
        assert_eq!(next.unwrap().as_str(), "https://www.sydsvenskan.se/sok?q=pile+by&page=2");
        assert!(document_link(&doc, "a.previous", &base()).is_none());
    }

    #[rstest]
    #[case("/2023-05-17/nyheter/a", Some("https://www.sydsvenskan.se/2023-05-17/nyheter/a"))]
    #[case("sok?q=x&page=2", Some("https://www.sydsvenskan.se/sok?q=x&page=2"))]
    #[case("https://cdn.example.com/i.jpg", Some("https://cdn.example.com/i.jpg"))]
    #[case("  /trimmed  ", Some("https://www.sydsvenskan.se/trimmed"))]
    #[case("http://[::1", None)]
    fn test_resolve(#[case] href: &str, #[case] expected: Option<&str>) {
        assert_eq!(resolve(&base(), href).as_ref().map(Url::as_str), expected);
    }

    #[rstest]
    #[case("https://www.sydsvenskan.se/2023-05-17/nyheter/pile-by", Some(datetime!(2023-05-17 00:00 UTC)))]
    #[case("https://www.sydsvenskan.se/1999-12-31/a/2001-01-01", Some(datetime!(1999-12-31 00:00 UTC)))]
    #[case("https://www.sydsvenskan.se/nyheter/pile-by", None)]
    #[case("https://www.sydsvenskan.se/2023-13-45/bad-date", None)]
    #[case("", None)]
    fn test_published_from_url(#[case] url: &str, #[case] expected: Option<OffsetDateTime>) {
        assert_eq!(published_from_url(url), expected);
    }

    #[rstest]
    #[case("2023-05-17T08:30:15.250Z", Some(datetime!(2023-05-17 08:30:15.250 UTC)))]
    #[case(" 2023-05-17T08:30:15.000Z ", Some(datetime!(2023-05-17 08:30:15 UTC)))]
    #[case("2023-05-17T08:30:15Z", None)]
    #[case("17 maj 2023", None)]
    fn test_parse_listing_time(#[case] value: &str, #[case] expected: Option<OffsetDateTime>) {
        assert_eq!(parse_listing_time(value), expected);
    }
}
