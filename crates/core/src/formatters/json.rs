use crate::Result;
use crate::article::Article;
use crate::teaser::Teaser;
use serde::Serialize;

/// Complete JSON output for the news day listing
#[derive(Debug, Clone, Serialize)]
pub struct NewsdayOutput<'a> {
    /// Number of articles
    pub count: usize,
    /// Articles in listing order
    pub articles: &'a [Article],
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print the listing document
    pub pretty: bool,
}

fn to_string<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty { Ok(serde_json::to_string_pretty(value)?) } else { Ok(serde_json::to_string(value)?) }
}

/// Convert the news day listing to a single JSON document
pub fn articles_to_json(articles: &[Article], config: &JsonConfig) -> Result<String> {
    let output = NewsdayOutput { count: articles.len(), articles };
    to_string(&output, config.pretty)
}

/// Convert one search hit to a single JSON line.
///
/// Search results are streamed, so each teaser is always written compact.
pub fn teaser_to_json(teaser: &Teaser) -> Result<String> {
    to_string(teaser, false)
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn articles(&self, articles: &[Article]) -> Result<String> {
        articles_to_json(articles, &self.config)
    }

    pub fn teaser(&self, teaser: &Teaser) -> Result<String> {
        teaser_to_json(teaser)
    }
}
