pub mod article;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod newsday;
pub mod parse;
pub mod search;
pub mod teaser;

pub use article::Article;
pub use client::Sydsvenskan;
pub use config::{SiteConfig, SiteConfigBuilder};
pub use error::{Result, SydsvenskanError};
pub use fetch::FetchConfig;
pub use fetch::fetch_url;
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter};
pub use formatters::{article_to_text, articles_to_json, teaser_to_json, teaser_to_text};
pub use newsday::{fetch_newsday_feed, fetch_newsday_feed_with_config, parse_newsday_page};
#[doc(hidden)]
pub use parse::{Document, Element};
pub use search::{ResultsPage, SearchStream, Termination, search, search_with_config};
pub use teaser::Teaser;
