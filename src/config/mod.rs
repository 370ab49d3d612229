use crate::errors::{HeadlinesError, HeadlinesResult};

/// Minimum trimmed length of an article's body text
pub const DEFAULT_MIN_TEXT_LEN: usize = 20;
/// Size of the displayed set
pub const DEFAULT_MAX_ARTICLES: usize = 4;
/// Candidates requested upstream before filtering
pub const DEFAULT_PAGE_SIZE: usize = 30;

pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_CITY: &str = "Oakland";

/// Heuristics applied when turning an upstream page into a displayed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedLimits {
    pub min_text_len: usize,
    pub max_articles: usize,
    pub page_size: usize,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            min_text_len: DEFAULT_MIN_TEXT_LEN,
            max_articles: DEFAULT_MAX_ARTICLES,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub news_endpoint: Option<String>,
    pub newsapi_key: Option<String>,
    pub country: String,
    pub weather_endpoint: Option<String>,
    pub city: String,
    pub db_path: String,
    pub limits: FeedLimits,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> HeadlinesResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let db_path = std::env::var("HEADLINES_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("headlines.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./headlines.db".to_string())
        });

        let defaults = FeedLimits::default();
        let limits = FeedLimits {
            min_text_len: limit_from_env("HEADLINES_MIN_TEXT_LEN", defaults.min_text_len)?,
            max_articles: limit_from_env("HEADLINES_MAX_ARTICLES", defaults.max_articles)?,
            page_size: limit_from_env("HEADLINES_PAGE_SIZE", defaults.page_size)?,
        };

        Ok(Self {
            news_endpoint: non_empty_var("HEADLINES_NEWS_ENDPOINT"),
            newsapi_key: non_empty_var("NEWSAPI_ACCESS_KEY"),
            country: non_empty_var("HEADLINES_COUNTRY")
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            weather_endpoint: non_empty_var("HEADLINES_WEATHER_ENDPOINT"),
            city: non_empty_var("HEADLINES_CITY").unwrap_or_else(|| DEFAULT_CITY.to_string()),
            db_path,
            limits,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn limit_from_env(name: &str, default: usize) -> HeadlinesResult<usize> {
    match non_empty_var(name) {
        Some(raw) => parse_limit(name, &raw),
        None => Ok(default),
    }
}

fn parse_limit(name: &str, raw: &str) -> HeadlinesResult<usize> {
    match raw.parse::<usize>() {
        Ok(0) => Err(HeadlinesError::Config(format!("{} must be greater than zero", name))),
        Ok(value) => Ok(value),
        Err(_) => Err(HeadlinesError::Config(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}
