use crate::config::Config;
use crate::errors::{HeadlinesError, HeadlinesResult};
use crate::sources::endpoint::EndpointSource;
use crate::sources::newsapi::NewsApiSource;
use crate::sources::traits::NewsSource;

/// Pick the news boundary from configuration. A NewsAPI key wins over an
/// endpoint.
pub fn source_from_config(config: &Config) -> HeadlinesResult<Box<dyn NewsSource>> {
    if let Some(key) = &config.newsapi_key {
        return Ok(Box::new(NewsApiSource::new(
            key,
            &config.country,
            config.limits.page_size,
        )?));
    }

    if let Some(endpoint) = &config.news_endpoint {
        return Ok(Box::new(EndpointSource::new(endpoint)?));
    }

    Err(HeadlinesError::NoNewsSource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedLimits;
    use crate::sources::traits::SourceKind;

    fn config(endpoint: Option<&str>, key: Option<&str>) -> Config {
        Config {
            news_endpoint: endpoint.map(str::to_string),
            newsapi_key: key.map(str::to_string),
            country: "us".to_string(),
            weather_endpoint: None,
            city: "Oakland".to_string(),
            db_path: ":memory:".to_string(),
            limits: FeedLimits::default(),
        }
    }

    #[test]
    fn test_newsapi_key_preferred() {
        let source =
            source_from_config(&config(Some("https://news.example.com"), Some("k"))).unwrap();
        assert_eq!(source.kind(), SourceKind::NewsApi);
    }

    #[test]
    fn test_endpoint_fallback() {
        let source = source_from_config(&config(Some("https://news.example.com"), None)).unwrap();
        assert_eq!(source.kind(), SourceKind::Endpoint);
    }

    #[test]
    fn test_nothing_configured() {
        let result = source_from_config(&config(None, None));
        assert!(matches!(result, Err(HeadlinesError::NoNewsSource)));
    }

    #[test]
    fn test_bad_endpoint() {
        let result = source_from_config(&config(Some("::nope::"), None));
        assert!(matches!(result, Err(HeadlinesError::InvalidUrl(_))));
    }
}
