//! Paginated search.
//!
//! [`search`] starts a producer task that walks the result pages for one
//! query: fetch a page, extract its teasers, hand them over one at a time,
//! follow the "next" link, repeat. The consumer side is a [`SearchStream`].
//!
//! Producer and consumer meet on a channel with a single slot, so the
//! producer is never more than one page ahead. Closing the stream (by
//! [`SearchStream::cancel`] or by dropping it) is the cancellation signal:
//! the producer checks it before every fetch, races every fetch against it
//! and sees it on every hand-over.
//!
//! # Example
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use sydsvenskan_core::{Termination, search};
//!
//! # async fn run() {
//! let mut results = search("Pile by");
//! while let Some(item) = results.next().await {
//!     match item {
//!         Ok(teaser) => println!("{} {:?}", teaser.title, teaser.published),
//!         Err(e) => eprintln!("search stopped: {}", e),
//!     }
//! }
//! assert!(matches!(results.termination(), Some(Termination::Exhausted { .. })));
//! # }
//! ```

use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::Stream;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::SiteConfig;
use crate::extract;
use crate::fetch::fetch_url;
use crate::parse::Document;
use crate::teaser::{RESULTS_SELECTOR, Teaser};
use crate::{Result, SydsvenskanError};

/// Link to the following results page.
pub const PAGINATION_SELECTOR: &str = r#"[class^="pagination"] > a[class*="pagination__link--next"]"#;

/// Why a [`SearchStream`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// The last page had no "next" link.
    Exhausted {
        /// Number of result pages fetched.
        pages: usize,
    },
    /// A page could not be fetched; the stream yielded the error as its last item.
    FetchFailed {
        /// The page that failed.
        url: String,
    },
    /// The consumer cancelled the stream.
    Cancelled,
    /// The producer went away without saying why.
    Interrupted,
}

/// Teasers and pagination link extracted from one results page.
#[derive(Debug, Clone)]
pub struct ResultsPage {
    /// Teasers in document order.
    pub teasers: Vec<Teaser>,
    /// Absolute URL of the next page, if the page links one.
    pub next: Option<Url>,
}

impl ResultsPage {
    /// Extracts a results page.
    ///
    /// Each teaser is stamped with `query` and the time it was built. If the
    /// result list cannot be selected the page has no teasers, but the
    /// pagination link is still looked up.
    pub fn parse(html: &str, query: &str, config: &SiteConfig) -> Result<Self> {
        let doc = Document::parse(html)?;

        let teasers = match doc.select(RESULTS_SELECTOR) {
            Ok(nodes) => nodes
                .iter()
                .map(|node| Teaser::from_element(node, &config.base_url, query, OffsetDateTime::now_utc()))
                .collect(),
            Err(e) => {
                warn!(error = %e, "Could not select search results");
                Vec::new()
            }
        };

        let next = extract::document_link(&doc, PAGINATION_SELECTOR, &config.base_url);

        Ok(Self { teasers, next })
    }
}

enum PagerEvent {
    Teaser(Teaser),
    Exhausted { pages: usize },
    Failed { url: String, error: SydsvenskanError },
}

/// Searches with the default site configuration.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime, since the producer is started
/// with [`tokio::spawn`].
pub fn search(query: &str) -> SearchStream {
    search_with_config(query, SiteConfig::default())
}

/// Searches using `config`.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime, since the producer is started
/// with [`tokio::spawn`].
pub fn search_with_config(query: &str, config: SiteConfig) -> SearchStream {
    let (sender, receiver) = mpsc::channel(1);
    let session = Session { query: query.to_string(), config, sender };
    tokio::spawn(session.run());

    SearchStream { receiver, termination: None }
}

/// The stream of teasers for one search.
///
/// Yields `Ok(teaser)` in page order, then ends. If a page cannot be fetched
/// the last item is `Err`. [`termination`](SearchStream::termination) tells
/// how it ended. A stream is not restartable; call [`search`] again for a
/// fresh session.
pub struct SearchStream {
    receiver: mpsc::Receiver<PagerEvent>,
    termination: Option<Termination>,
}

impl SearchStream {
    /// Stops the search.
    ///
    /// No further items are yielded, and the producer abandons any in-flight
    /// request at its next suspension point.
    pub fn cancel(&mut self) {
        if self.termination.is_none() {
            self.termination = Some(Termination::Cancelled);
        }
        self.receiver.close();
    }

    /// How the stream ended, `None` while it is still running.
    pub fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    /// Whether the stream has ended, for any reason.
    ///
    /// Once this is true, polling yields `None`.
    pub fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }
}

impl Stream for SearchStream {
    type Item = Result<Teaser>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.termination == Some(Termination::Cancelled) {
            return Poll::Ready(None);
        }

        loop {
            match ready!(this.receiver.poll_recv(cx)) {
                Some(PagerEvent::Teaser(teaser)) => return Poll::Ready(Some(Ok(teaser))),
                Some(PagerEvent::Exhausted { pages }) => {
                    this.termination = Some(Termination::Exhausted { pages });
                }
                Some(PagerEvent::Failed { url, error }) => {
                    this.termination = Some(Termination::FetchFailed { url });
                    return Poll::Ready(Some(Err(error)));
                }
                None => {
                    if this.termination.is_none() {
                        this.termination = Some(Termination::Interrupted);
                    }
                    return Poll::Ready(None);
                }
            }
        }
    }
}

/// State owned by one producer task.
struct Session {
    query: String,
    config: SiteConfig,
    sender: mpsc::Sender<PagerEvent>,
}

impl Session {
    async fn run(self) {
        let mut url = match self.config.search_url(&self.query) {
            Ok(url) => url,
            Err(error) => {
                warn!(query = %self.query, error = %error, "Could not build search URL");
                let failed = PagerEvent::Failed { url: self.config.search_url_template.clone(), error };
                let _ = self.sender.send(failed).await;
                return;
            }
        };
        let mut pages = 0;

        loop {
            if self.sender.is_closed() {
                debug!(query = %self.query, pages, "Search cancelled before fetch");
                return;
            }

            debug!(query = %self.query, %url, page = pages + 1, "Fetching results page");
            let fetched = tokio::select! {
                biased;
                _ = self.sender.closed() => {
                    debug!(query = %self.query, %url, "Search cancelled during fetch");
                    return;
                }
                result = fetch_url(&url, &self.config.fetch) => result,
            };

            let page = match fetched.and_then(|html| ResultsPage::parse(&html, &self.query, &self.config)) {
                Ok(page) => page,
                Err(error) => {
                    warn!(query = %self.query, %url, error = %error, "Could not load results page");
                    let _ = self.sender.send(PagerEvent::Failed { url: url.to_string(), error }).await;
                    return;
                }
            };
            pages += 1;

            info!(
                query = %self.query,
                page = pages,
                count = page.teasers.len(),
                has_next = page.next.is_some(),
                "Extracted results page"
            );

            for teaser in page.teasers {
                if self.sender.send(PagerEvent::Teaser(teaser)).await.is_err() {
                    debug!(query = %self.query, pages, "Search cancelled during hand-over");
                    return;
                }
            }

            match page.next {
                Some(next) => url = next,
                None => {
                    debug!(query = %self.query, pages, "Search exhausted");
                    let _ = self.sender.send(PagerEvent::Exhausted { pages }).await;
                    return;
                }
            }
        }
    }
}
