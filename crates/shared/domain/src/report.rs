use crate::{SearchHit, SearchMode};
use serde::{Deserialize, Serialize};

/// Outcome of collecting one domain.
///
/// A failed domain keeps its slot in the output with `error` set and no hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainReport {
    pub domain: String,
    pub mode: SearchMode,
    pub hits: Vec<SearchHit>,
    pub error: Option<String>,
}

impl DomainReport {
    pub fn ok(domain: impl Into<String>, mode: SearchMode, hits: Vec<SearchHit>) -> Self {
        Self { domain: domain.into(), mode, hits, error: None }
    }

    pub fn failed(domain: impl Into<String>, mode: SearchMode, error: impl ToString) -> Self {
        Self { domain: domain.into(), mode, hits: Vec::new(), error: Some(error.to_string()) }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.hits.len()
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.hits.iter().map(|hit| hit.url.as_str())
    }
}
