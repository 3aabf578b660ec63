//! Multi-page collection on top of a [`SearchBackend`].

use crate::client::{SearchBackend, SearchQuery};
use crate::error::SearchError;
use fxhash::FxHashSet;
use tracing::{debug, warn};
use urlc_domain::SearchHit;
use urlc_kernel::url::normalize_domain;

/// Upper bound on pages for open-ended (brand and lenient) searches.
pub const MAX_LENIENT_PAGES: u32 = 10;

/// How a [`Paginator`] walks result pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    pub per_page: usize,
    pub max_pages: u32,
    /// Stop at the first page that adds no new URL.
    pub stop_when_stale: bool,
    /// End with the partial result instead of failing on a backend error.
    pub tolerate_errors: bool,
}

impl PagingPolicy {
    /// Just enough pages to reach `limit`; stale pages stop, errors propagate.
    #[must_use]
    pub fn strict(per_page: usize, limit: usize) -> Self {
        let per_page = per_page.max(1);
        let max_pages = u32::try_from(limit.div_ceil(per_page)).unwrap_or(u32::MAX);
        Self { per_page, max_pages, stop_when_stale: true, tolerate_errors: false }
    }

    /// Up to [`MAX_LENIENT_PAGES`]; errors end collection quietly.
    #[must_use]
    pub fn lenient(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            max_pages: MAX_LENIENT_PAGES,
            stop_when_stale: false,
            tolerate_errors: true,
        }
    }
}

/// Collects unique hits for one query across pages.
#[derive(Debug)]
pub struct Paginator<'a, B> {
    backend: &'a B,
    policy: PagingPolicy,
}

impl<'a, B: SearchBackend> Paginator<'a, B> {
    pub const fn new(backend: &'a B, policy: PagingPolicy) -> Self {
        Self { backend, policy }
    }

    /// Fetches pages until `limit` unique URLs are gathered or the policy says stop.
    ///
    /// Links are de-duplicated by exact string and empty links are skipped.
    pub async fn collect(&self, q: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        let mut hits = Vec::new();
        let mut seen = FxHashSet::default();
        let mut page = 1;

        while hits.len() < limit && page <= self.policy.max_pages {
            let query = SearchQuery::new(q, self.policy.per_page).page(page);
            let results = match self.backend.search(&query).await {
                Ok(results) => results,
                Err(err) if self.policy.tolerate_errors => {
                    warn!(q, page, error = %err, "Search page failed; keeping partial results");
                    break;
                },
                Err(err) => return Err(err),
            };

            if results.is_empty() {
                debug!(q, page, "No more results");
                break;
            }

            let before = hits.len();
            for result in results {
                if !result.link.is_empty() && seen.insert(result.link.clone()) {
                    hits.push(result.into_hit());
                }
            }

            if self.policy.stop_when_stale && hits.len() == before {
                debug!(q, page, "Page added no new URLs");
                break;
            }
            page += 1;
        }

        hits.truncate(limit);
        Ok(hits)
    }
}

/// `site:` search for `domain`, fetching only the pages needed for `limit` results.
pub async fn site_search<B: SearchBackend>(
    backend: &B,
    domain: &str,
    limit: usize,
    per_page: usize,
) -> Result<Vec<SearchHit>, SearchError> {
    let domain = normalize_domain(domain);
    let hits = Paginator::new(backend, PagingPolicy::strict(per_page, limit))
        .collect(&format!("site:{domain}"), limit)
        .await?;

    debug!(domain = %domain, found = hits.len(), "Site search finished");
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_pages_cover_the_limit() {
        assert_eq!(PagingPolicy::strict(10, 100).max_pages, 10);
        assert_eq!(PagingPolicy::strict(10, 95).max_pages, 10);
        assert_eq!(PagingPolicy::strict(10, 1).max_pages, 1);
        assert_eq!(PagingPolicy::strict(10, 0).max_pages, 0);
        assert_eq!(PagingPolicy::strict(0, 3).per_page, 1);
    }

    #[test]
    fn lenient_is_capped_and_tolerant() {
        let policy = PagingPolicy::lenient(10);
        assert_eq!(policy.max_pages, MAX_LENIENT_PAGES);
        assert!(policy.tolerate_errors);
        assert!(!policy.stop_when_stale);
    }
}
