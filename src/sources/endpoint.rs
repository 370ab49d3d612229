use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::domain::RawArticle;
use crate::errors::HeadlinesResult;
use crate::sources::payload::{parse_articles, success_body, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::sources::traits::{NewsSource, SourceKind};

/// A news endpoint that answers `GET ?exclude=[...]` with
/// `{"articles": [...]}` and treats the exclusion list as a hint.
pub struct EndpointSource {
    client: Client,
    endpoint: Url,
}

impl EndpointSource {
    pub fn new(endpoint: &str) -> HeadlinesResult<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint: Url::parse(endpoint)?,
        })
    }

    /// The request URL, carrying `exclude` as a JSON list when non-empty
    fn request_url(&self, exclude: &[String]) -> HeadlinesResult<Url> {
        let mut url = self.endpoint.clone();

        if !exclude.is_empty() {
            let encoded = serde_json::to_string(exclude)?;
            url.query_pairs_mut().append_pair("exclude", &encoded);
        }

        Ok(url)
    }
}

impl NewsSource for EndpointSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Endpoint
    }

    fn fetch_raw(&self, exclude: &[String]) -> HeadlinesResult<Vec<RawArticle>> {
        let url = self.request_url(exclude)?;
        debug!(%url, excluded = exclude.len(), "requesting news endpoint");

        let response = self.client.get(url).send()?;
        let body = success_body(response)?;

        parse_articles(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_without_exclusion() {
        let source = EndpointSource::new("https://news.example.com/api/news").unwrap();

        let url = source.request_url(&[]).unwrap();

        assert_eq!(url.as_str(), "https://news.example.com/api/news");
    }

    #[test]
    fn test_request_url_carries_json_exclusion() {
        let source = EndpointSource::new("https://news.example.com/api/news").unwrap();
        let exclude = vec!["First & last".to_string(), "Second".to_string()];

        let url = source.request_url(&exclude).unwrap();
        let (key, value) = url.query_pairs().next().unwrap();

        assert_eq!(key, "exclude");
        assert_eq!(value, r#"["First & last","Second"]"#);
    }

    #[test]
    fn test_request_url_keeps_existing_query() {
        let source = EndpointSource::new("https://news.example.com/api/news?region=us").unwrap();

        let url = source.request_url(&["A".to_string()]).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("region".to_string(), "us".to_string()));
        assert_eq!(pairs[1].0, "exclude");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(EndpointSource::new("not a url").is_err());
    }

    #[test]
    fn test_source_kind() {
        let source = EndpointSource::new("https://news.example.com").unwrap();
        assert_eq!(source.kind(), SourceKind::Endpoint);
    }
}
