use serde::{Deserialize, Serialize};

/// One organic search result as collected from the search API.
///
/// `domain` is the host of `url` (with the port, when one is present).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub domain: String,
}

impl SearchHit {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self { url: url.into(), title: title.into(), snippet: snippet.into(), domain: domain.into() }
    }

    /// Returns the hit with its URL replaced, keeping the metadata.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}
