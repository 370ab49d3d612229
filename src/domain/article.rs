use serde::Deserialize;

/// A normalized news item, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub source: Option<String>,
    pub author: Option<String>,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub published_at: String,
    pub content: String,
}

impl Article {
    pub fn new(title: String, url: String) -> Self {
        Self {
            source: None,
            author: None,
            title,
            description: String::new(),
            url,
            image_url: String::new(),
            published_at: String::new(),
            content: String::new(),
        }
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub fn with_image_url(mut self, image_url: String) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn with_published_at(mut self, published_at: String) -> Self {
        self.published_at = published_at;
        self
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = content;
        self
    }

    /// The text the quality gate measures: content first, then description.
    pub fn body_for_quality(&self) -> &str {
        if !self.content.is_empty() {
            &self.content
        } else {
            &self.description
        }
    }

    /// The text shown under the headline: description first, then content.
    pub fn body_for_display(&self) -> &str {
        if !self.description.is_empty() {
            &self.description
        } else {
            &self.content
        }
    }

    /// True when there is anything at all worth putting on screen.
    pub fn is_presentable(&self) -> bool {
        !self.title.is_empty() || !self.description.is_empty() || !self.content.is_empty()
    }

    /// Author, then source name, then "Unknown".
    pub fn byline(&self) -> &str {
        self.author
            .as_deref()
            .filter(|a| !a.is_empty())
            .or_else(|| self.source.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("Unknown")
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// Upstream `source` field: NewsAPI sends `{"id": .., "name": ..}`, cleaning
/// proxies flatten it to the name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawSource {
    Plain(String),
    Named {
        #[serde(default)]
        name: Option<String>,
    },
    Other(serde_json::Value),
}

impl RawSource {
    pub fn name(&self) -> Option<&str> {
        match self {
            RawSource::Plain(name) => Some(name.as_str()),
            RawSource::Named { name } => name.as_deref(),
            RawSource::Other(_) => None,
        }
    }
}

/// An article record as the news boundary returns it. Every field may be
/// missing or null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
