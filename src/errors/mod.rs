use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeadlinesError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No news source configured (set HEADLINES_NEWS_ENDPOINT or NEWSAPI_ACCESS_KEY)")]
    NoNewsSource,

    #[error("No weather source configured (set HEADLINES_WEATHER_ENDPOINT)")]
    NoWeatherSource,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Refusing to open a '{0}' link")]
    UnsupportedLink(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    // Parsing errors
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HeadlinesResult<T> = Result<T, HeadlinesError>;
