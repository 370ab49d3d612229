use crate::domain::RawArticle;
use crate::errors::HeadlinesResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A news endpoint that accepts an exclusion list
    Endpoint,
    /// NewsAPI top headlines, queried directly
    NewsApi,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Endpoint => "endpoint",
            SourceKind::NewsApi => "newsapi",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The network boundary for news. Implementations perform the request and
/// decode the body; they do no quality filtering.
#[cfg_attr(test, mockall::automock)]
pub trait NewsSource: Send + Sync {
    /// Identifies this source type
    fn kind(&self) -> SourceKind;

    /// Fetch a page of raw records, steering away from `exclude` titles
    /// where the upstream allows it
    fn fetch_raw(&self, exclude: &[String]) -> HeadlinesResult<Vec<RawArticle>>;
}
