use crate::domain::Article;
use crate::errors::HeadlinesError;

/// Which way the user asked to rotate. Only the exit transition looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Previous => "previous",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of asking the news boundary for a fresh page.
#[derive(Debug)]
pub enum FetchOutcome {
    /// At least one article survived normalization
    Articles(Vec<Article>),
    /// The request worked but nothing usable came back
    Empty,
    /// Transport, status or payload failure
    Failed(HeadlinesError),
}

impl FetchOutcome {
    pub fn from_articles(articles: Vec<Article>) -> Self {
        if articles.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Articles(articles)
        }
    }

    /// Collapse to the plain contract: failures read as "no articles".
    pub fn into_articles(self) -> Vec<Article> {
        match self {
            FetchOutcome::Articles(articles) => articles,
            FetchOutcome::Empty | FetchOutcome::Failed(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(usize),
    /// Input had nothing presentable; prior content kept
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationOutcome {
    /// A new set replaced the display
    Rendered(usize),
    /// Upstream had nothing new; display untouched
    Exhausted,
    /// Upstream failed; display untouched
    Failed(String),
    /// Another rotation was already in flight; request dropped
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_outcome_from_articles() {
        assert!(matches!(FetchOutcome::from_articles(Vec::new()), FetchOutcome::Empty));

        let article = Article::new("Title".to_string(), "https://example.com".to_string());
        match FetchOutcome::from_articles(vec![article]) {
            FetchOutcome::Articles(articles) => assert_eq!(articles.len(), 1),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_failed_fetch_reads_as_no_articles() {
        let outcome = FetchOutcome::Failed(HeadlinesError::UpstreamStatus(503));
        assert!(outcome.into_articles().is_empty());
    }
}
