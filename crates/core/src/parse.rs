//! HTML parsing and tree queries.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and querying the tree with CSS selectors. Queries made from an
//! [`Element`] only look at that element's descendants.
//!
//! # Example
//!
//! ```rust
//! use sydsvenskan_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div class="teaser teaser--premium"><h2 class="teaser__heading">Rubrik</h2></div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let teaser = doc.select_first("div.teaser").unwrap();
//! assert_eq!(teaser.select_first("h2").unwrap().text(), "Rubrik");
//! assert!(teaser.matches("[class*=\"teaser--premium\"]"));
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{Result, SydsvenskanError};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors. It borrows nothing and owns the whole tree; elements
/// handed out by [`select`](Document::select) borrow from it.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed markup still produces a tree.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects all elements matching a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`SydsvenskanError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector.
    ///
    /// An invalid selector is reported as no match.
    pub fn select_first(&'_ self, selector: &str) -> Option<Element<'_>> {
        let sel = compile(selector).ok()?;
        self.html.select(&sel).next().map(|el| Element { element: el })
    }
}

/// A wrapper around scraper's ElementRef.
///
/// Element represents a single node in the document tree and provides
/// methods for reading its attributes and text, and for querying below it.
///
/// # Example
///
/// ```rust
/// use sydsvenskan_core::parse::Document;
///
/// let html = r#"<a class="teaser__text-link" href="/2023-05-17/a">Länk</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = doc.select_first("a").unwrap();
///
/// assert_eq!(link.text(), "Länk");
/// assert_eq!(link.attr("href"), Some("/2023-05-17/a"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, `None` when absent.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SydsvenskanError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first descendant matching a CSS selector.
    ///
    /// An invalid selector is reported as no match.
    pub fn select_first(&self, selector: &str) -> Option<Element<'a>> {
        let sel = compile(selector).ok()?;
        self.element.select(&sel).next().map(|el| Element { element: el })
    }

    /// Finds the first direct child element with the given tag name.
    pub fn child(&self, tag: &str) -> Option<Element<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name().eq_ignore_ascii_case(tag))
            .map(|el| Element { element: el })
    }

    /// Tests whether this element itself matches a CSS selector.
    ///
    /// An invalid selector never matches.
    pub fn matches(&self, selector: &str) -> bool {
        compile(selector).map(|sel| sel.matches(&self.element)).unwrap_or(false)
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SydsvenskanError::HtmlParseError(format!("Invalid selector: {}", e)))
}
