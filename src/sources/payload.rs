use reqwest::blocking::Response;
use serde_json::Value;
use tracing::debug;

use crate::domain::RawArticle;
use crate::errors::{HeadlinesError, HeadlinesResult};

/// Request timeout shared by the news and weather boundaries
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Reject non-success responses, otherwise hand back the body bytes.
pub fn success_body(response: Response) -> HeadlinesResult<Vec<u8>> {
    let status = response.status();
    if !status.is_success() {
        return Err(HeadlinesError::UpstreamStatus(status.as_u16()));
    }

    Ok(response.bytes()?.to_vec())
}

/// Decode `{"articles": [...]}`. A body that is not JSON is an error; a
/// missing or non-list `articles` field, or individual records that are not
/// objects, simply contribute nothing.
pub fn parse_articles(bytes: &[u8]) -> HeadlinesResult<Vec<RawArticle>> {
    let body: Value = serde_json::from_slice(bytes)?;

    let items = match body.get("articles") {
        Some(Value::Array(items)) => items,
        _ => {
            debug!("payload has no article list");
            return Ok(Vec::new());
        }
    };

    let articles = items
        .iter()
        .filter_map(|item| match serde_json::from_value::<RawArticle>(item.clone()) {
            Ok(raw) if item.is_object() => Some(raw),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "skipping undecodable article record");
                None
            }
        })
        .collect();

    Ok(articles)
}
