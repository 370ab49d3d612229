use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::errors::HeadlinesResult;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::TitleCache;

/// Key of the single entry holding the JSON list of shown titles
pub const TITLES_KEY: &str = "headlines.titles";

pub struct SqliteTitleCache {
    storage: SqliteStorage,
}

impl SqliteTitleCache {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    /// Read the stored titles, surfacing storage errors. A value that is not
    /// a JSON list of strings reads as empty.
    pub fn try_load(&self) -> HeadlinesResult<BTreeSet<String>> {
        let raw = match self.storage.get(TITLES_KEY)? {
            Some(raw) => raw,
            None => return Ok(BTreeSet::new()),
        };

        Ok(parse_titles(&raw))
    }

    pub fn try_save(&self, titles: &[String]) -> HeadlinesResult<()> {
        let kept: Vec<&str> = titles
            .iter()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .collect();
        let encoded = serde_json::to_string(&kept)?;
        self.storage.set(TITLES_KEY, &encoded)
    }

    pub fn try_clear(&self) -> HeadlinesResult<()> {
        self.storage.remove(TITLES_KEY)
    }
}

fn parse_titles(raw: &str) -> BTreeSet<String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(title) if !title.is_empty() => Some(title),
                _ => None,
            })
            .collect(),
        Ok(_) => {
            debug!("stored titles are not a list, treating cache as empty");
            BTreeSet::new()
        }
        Err(e) => {
            debug!(error = %e, "stored titles are not valid JSON, treating cache as empty");
            BTreeSet::new()
        }
    }
}

impl TitleCache for SqliteTitleCache {
    fn load(&self) -> BTreeSet<String> {
        self.try_load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read title cache");
            BTreeSet::new()
        })
    }

    fn save(&self, titles: &[String]) {
        if let Err(e) = self.try_save(titles) {
            warn!(error = %e, "could not persist title cache");
        }
    }
}
