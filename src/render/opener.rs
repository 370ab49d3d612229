use tracing::debug;
use url::Url;

use crate::errors::{HeadlinesError, HeadlinesResult};

/// Opens an article URL in a fresh browsing context that holds no reference
/// back to this process.
#[cfg_attr(test, mockall::automock)]
pub trait Opener: Send + Sync {
    fn open(&self, url: &str) -> HeadlinesResult<()>;
}

/// Hands the URL to the platform's default browser.
pub struct SystemOpener;

impl SystemOpener {
    /// Only web links leave the process; anything else an upstream sends is refused.
    fn checked(url: &str) -> HeadlinesResult<Url> {
        let parsed = Url::parse(url)?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(HeadlinesError::UnsupportedLink(other.to_string())),
        }
    }
}

impl Opener for SystemOpener {
    fn open(&self, url: &str) -> HeadlinesResult<()> {
        let target = Self::checked(url)?;
        debug!(url = %target, "opening article");
        webbrowser::open(target.as_str())?;
        Ok(())
    }
}
