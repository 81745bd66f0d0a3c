use crate::article::Article;
use crate::teaser::Teaser;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Configuration for plain text output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Separator between fields on one line
    pub separator: String,

    /// Append the preamble to search hits
    pub include_preamble: bool,

    /// Mark paywalled search hits
    pub mark_premium: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { separator: " ".to_string(), include_preamble: false, mark_premium: false }
    }
}

/// Plain text formatter for listing entries and search hits
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn article(&self, article: &Article) -> String {
        article_to_text(article, &self.config)
    }

    pub fn teaser(&self, teaser: &Teaser) -> String {
        teaser_to_text(teaser, &self.config)
    }
}

/// One line per listing entry: title, url and RFC 3339 time.
///
/// Missing values are written as `-` so the columns stay aligned.
pub fn article_to_text(article: &Article, config: &TextConfig) -> String {
    let time = article.time.and_then(|t| t.format(&Rfc3339).ok());
    [or_dash(&article.title), or_dash(&article.url), time.unwrap_or_else(|| "-".to_string())].join(&config.separator)
}

/// One line per search hit: title and publish date.
pub fn teaser_to_text(teaser: &Teaser, config: &TextConfig) -> String {
    let mut parts = Vec::new();

    if config.mark_premium && teaser.is_premium {
        parts.push("[+]".to_string());
    }

    parts.push(or_dash(&teaser.title));
    parts.push(format_date(teaser.published));

    if config.include_preamble && !teaser.preamble.is_empty() {
        parts.push(teaser.preamble.clone());
    }

    parts.join(&config.separator)
}

/// `YYYY-MM-DD`, or `-` when there is no date.
pub fn format_date(value: Option<OffsetDateTime>) -> String {
    let format = format_description!("[year]-[month]-[day]");
    value.and_then(|d| d.format(&format).ok()).unwrap_or_else(|| "-".to_string())
}

fn or_dash(value: &str) -> String {
    if value.is_empty() { "-".to_string() } else { value.to_string() }
}
