#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use urlc_search::{OrganicResult, SearchBackend, SearchError, SearchQuery};

/// Serves canned pages per query string and records every request.
#[derive(Debug, Default)]
pub struct FakeSearch {
    pages: HashMap<String, Vec<Vec<OrganicResult>>>,
    failing: Vec<(String, u32)>,
    calls: Mutex<Vec<SearchQuery>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(mut self, q: &str, pages: Vec<Vec<OrganicResult>>) -> Self {
        self.pages.insert(q.to_owned(), pages);
        self
    }

    pub fn failing(mut self, q: &str, page: u32) -> Self {
        self.failing.push((q.to_owned(), page));
        self
    }

    pub fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queried(&self, q: &str) -> bool {
        self.calls().iter().any(|call| call.q == q)
    }
}

impl SearchBackend for FakeSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<OrganicResult>, SearchError> {
        self.calls.lock().unwrap().push(query.clone());
        let page = query.page.unwrap_or(1);

        if self.failing.iter().any(|(q, p)| *q == query.q && *p == page) {
            return Err(SearchError::Status { status: 500, body: "boom".to_owned(), context: None });
        }

        Ok(self
            .pages
            .get(&query.q)
            .and_then(|pages| pages.get(page as usize - 1))
            .cloned()
            .unwrap_or_default())
    }
}

pub fn page(links: &[&str]) -> Vec<OrganicResult> {
    links.iter().map(|link| OrganicResult::new(*link, "")).collect()
}

pub fn titled(items: &[(&str, &str)]) -> Vec<OrganicResult> {
    items.iter().map(|(link, title)| OrganicResult::new(*link, *title)).collect()
}

pub fn urls(hits: &[urlc_domain::SearchHit]) -> Vec<&str> {
    hits.iter().map(|hit| hit.url.as_str()).collect()
}
