use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::FeedLimits;
use crate::domain::{Article, FetchOutcome, RawArticle};
use crate::sources::NewsSource;

/// Produces presentable articles, never raising to the caller.
#[cfg_attr(test, mockall::automock)]
pub trait NewsFetcher: Send + Sync {
    /// Fetch a fresh set, steering away from `exclude`, and report how it went
    fn fetch_outcome(&self, exclude: &[String]) -> FetchOutcome;

    /// Plain form: any failure reads as an empty list
    fn fetch(&self, exclude: &[String]) -> Vec<Article> {
        self.fetch_outcome(exclude).into_articles()
    }
}

pub struct FeedFetcher {
    source: Box<dyn NewsSource>,
    limits: FeedLimits,
}

impl FeedFetcher {
    pub fn new(source: Box<dyn NewsSource>, limits: FeedLimits) -> Self {
        Self { source, limits }
    }

    /// Normalize, quality-filter and cap a raw page, keeping upstream order.
    pub fn select(&self, raw: Vec<RawArticle>) -> Vec<Article> {
        let received = raw.len();

        let articles: Vec<Article> = raw
            .into_iter()
            .map(normalize)
            .filter(|a| passes_quality(a, self.limits.min_text_len))
            .take(self.limits.max_articles)
            .collect();

        debug!(received, kept = articles.len(), "selected articles from page");
        articles
    }
}

impl NewsFetcher for FeedFetcher {
    fn fetch_outcome(&self, exclude: &[String]) -> FetchOutcome {
        match self.source.fetch_raw(exclude) {
            Ok(raw) => FetchOutcome::from_articles(self.select(raw)),
            Err(e) => {
                warn!(source = %self.source.kind(), error = %e, "news fetch failed");
                FetchOutcome::Failed(e)
            }
        }
    }
}

fn truncation_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"(?i)(?:\s*\[\+\d+\s+chars\])+$").expect("truncation marker pattern is valid")
    })
}

/// Remove the `[+N chars]` tail that upstream appends to cut-off content.
pub fn strip_truncation_marker(content: &str) -> String {
    truncation_marker().replace(content, "").into_owned()
}

/// Map an upstream record into an Article, defaulting missing fields.
pub fn normalize(raw: RawArticle) -> Article {
    let source = raw
        .source
        .as_ref()
        .and_then(|s| s.name())
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    let author = raw.author.filter(|a| !a.is_empty());
    let content = strip_truncation_marker(raw.content.as_deref().unwrap_or(""));

    Article::new(raw.title.unwrap_or_default(), raw.url.unwrap_or_default())
        .with_source(source)
        .with_author(author)
        .with_description(raw.description.unwrap_or_default())
        .with_image_url(raw.url_to_image.unwrap_or_default())
        .with_published_at(raw.published_at.unwrap_or_default())
        .with_content(content)
}

/// Content (or description when content is empty), trimmed, must reach
/// `min_len` characters.
pub fn passes_quality(article: &Article, min_len: usize) -> bool {
    article.body_for_quality().trim().chars().count() >= min_len
}
