pub mod json;
pub mod text;

pub use json::{JsonConfig, JsonFormatter, articles_to_json, teaser_to_json};
pub use text::{TextConfig, TextFormatter, article_to_text, teaser_to_text};
