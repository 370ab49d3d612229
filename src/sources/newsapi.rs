use std::collections::HashSet;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::domain::RawArticle;
use crate::errors::HeadlinesResult;
use crate::sources::payload::{parse_articles, success_body, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::sources::traits::{NewsSource, SourceKind};

pub const NEWSAPI_TOP_HEADLINES: &str = "https://newsapi.org/v2/top-headlines";

/// NewsAPI top headlines. The API has no exclusion parameter, so shown titles
/// are dropped here after the page comes back.
pub struct NewsApiSource {
    client: Client,
    base_url: Url,
    api_key: String,
    country: String,
    page_size: usize,
}

impl NewsApiSource {
    pub fn new(api_key: &str, country: &str, page_size: usize) -> HeadlinesResult<Self> {
        Self::with_base_url(NEWSAPI_TOP_HEADLINES, api_key, country, page_size)
    }

    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        country: &str,
        page_size: usize,
    ) -> HeadlinesResult<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: Url::parse(base_url)?,
            api_key: api_key.to_string(),
            country: country.to_string(),
            page_size,
        })
    }

    fn request_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("country", &self.country)
            .append_pair("pageSize", &self.page_size.to_string())
            .append_pair("apiKey", &self.api_key);
        url
    }
}

/// Comparison form of a title: trimmed and lower-cased
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Drop records whose title matches one in `exclude`.
pub fn apply_exclusion(articles: Vec<RawArticle>, exclude: &[String]) -> Vec<RawArticle> {
    if exclude.is_empty() {
        return articles;
    }

    let excluded: HashSet<String> = exclude.iter().map(|t| normalize_title(t)).collect();

    articles
        .into_iter()
        .filter(|a| {
            let title = a.title.as_deref().unwrap_or("");
            title.is_empty() || !excluded.contains(&normalize_title(title))
        })
        .collect()
}

impl NewsSource for NewsApiSource {
    fn kind(&self) -> SourceKind {
        SourceKind::NewsApi
    }

    fn fetch_raw(&self, exclude: &[String]) -> HeadlinesResult<Vec<RawArticle>> {
        debug!(country = %self.country, page_size = self.page_size, "requesting NewsAPI top headlines");

        let response = self.client.get(self.request_url()).send()?;
        let body = success_body(response)?;
        let articles = parse_articles(&body)?;

        Ok(apply_exclusion(articles, exclude))
    }
}
