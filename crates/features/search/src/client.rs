//! Serper.dev Google search client.

use crate::error::{SearchError, SearchErrorExt};
use reqwest::header::{ACCEPT_ENCODING, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use urlc_domain::SearchHit;
use urlc_domain::config::SerperConfig;
use urlc_kernel::url::netloc_of;

/// One search request. Locale parameters are filled in by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub num: usize,
    /// 1-based page; `None` omits the field from the request.
    pub page: Option<u32>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>, num: usize) -> Self {
        Self { q: q.into(), num, page: None }
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// An item of the response's `organic` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrganicResult {
    pub link: String,
    pub title: String,
    pub snippet: String,
}

impl OrganicResult {
    pub fn new(link: impl Into<String>, title: impl Into<String>) -> Self {
        Self { link: link.into(), title: title.into(), snippet: String::new() }
    }

    /// Converts to a [`SearchHit`] whose domain is the link's host.
    #[must_use]
    pub fn into_hit(self) -> SearchHit {
        let domain = netloc_of(&self.link);
        SearchHit { url: self.link, title: self.title, snippet: self.snippet, domain }
    }
}

/// Something that answers search queries with organic results.
pub trait SearchBackend: Send + Sync {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<OrganicResult>, SearchError>> + Send;
}

impl<B: SearchBackend> SearchBackend for &B {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<OrganicResult>, SearchError>> + Send {
        (**self).search(query)
    }
}

#[derive(Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    gl: &'a str,
    hl: &'a str,
    num: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
}

#[derive(Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

/// HTTP client for the Serper search endpoint.
#[derive(Clone)]
pub struct SerperClient {
    http: reqwest::Client,
    api_key: String,
    config: SerperConfig,
}

impl fmt::Debug for SerperClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerperClient")
            .field("endpoint", &self.config.endpoint)
            .field("country", &self.config.country)
            .field("language", &self.config.language)
            .finish_non_exhaustive()
    }
}

impl SerperClient {
    pub fn new(api_key: impl Into<String>, config: SerperConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building Serper HTTP client")?;

        Ok(Self { http, api_key: api_key.into(), config })
    }

    #[must_use]
    pub const fn config(&self) -> &SerperConfig {
        &self.config
    }
}

impl SearchBackend for SerperClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<OrganicResult>, SearchError> {
        let payload = SerperRequest {
            q: &query.q,
            gl: &self.config.country,
            hl: &self.config.language,
            num: query.num,
            page: query.page,
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("X-API-KEY", &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_ENCODING, "identity")
            .json(&payload)
            .send()
            .await
            .context("sending Serper request")?;

        let status = response.status();
        let body = response.text().await.context("reading Serper response")?;
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
                context: Some(format!("query {}", query.q).into()),
            });
        }

        let parsed = serde_json::from_str::<SerperResponse>(&body)
            .context("decoding Serper response")?;
        debug!(q = %query.q, page = ?query.page, results = parsed.organic.len(), "Serper page fetched");
        Ok(parsed.organic)
    }
}
