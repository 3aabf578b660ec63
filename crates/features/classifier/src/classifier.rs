//! Rule-first URL classification with LLM fallback.

use crate::client::CompletionBackend;
use crate::prompt::{build_prompt, parse_reply};
use fxhash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};
use urlc_domain::{Classification, SearchHit};
use urlc_filtering::{classify_by_rules, remove_page_param};

/// Classifies URLs as SEO or POST.
#[derive(Debug)]
pub struct UrlClassifier<'a, C> {
    backend: &'a C,
    batch_size: usize,
}

impl<'a, C: CompletionBackend> UrlClassifier<'a, C> {
    pub fn new(backend: &'a C, batch_size: usize) -> Self {
        Self { backend, batch_size: batch_size.max(1) }
    }

    /// Classification for each of `urls`, in input order.
    ///
    /// URLs with an obvious shape are decided by rules; the rest go to the backend in
    /// batches. A failed batch counts as POST.
    pub async fn classify<S: AsRef<str>>(&self, urls: &[S]) -> Vec<(String, Classification)> {
        let mut decided: FxHashMap<&str, Classification> = FxHashMap::default();
        let mut ambiguous: Vec<&str> = Vec::new();

        for url in urls {
            let url: &str = url.as_ref();
            if decided.contains_key(url) || ambiguous.contains(&url) {
                continue;
            }
            match classify_by_rules(url) {
                Some(class) => {
                    decided.insert(url, class);
                },
                None => ambiguous.push(url),
            }
        }

        let seo = decided.values().filter(|c| c.is_seo()).count();
        info!(seo, post = decided.len() - seo, ambiguous = ambiguous.len(), "Rule-based classification");

        for batch in ambiguous.chunks(self.batch_size) {
            let classes = self.classify_batch(batch).await;
            decided.extend(batch.iter().copied().zip(classes));
        }

        urls.iter()
            .map(|url| {
                let url = url.as_ref();
                let class = decided.get(url).copied().unwrap_or(Classification::Post);
                (url.to_owned(), class)
            })
            .collect()
    }

    async fn classify_batch(&self, batch: &[&str]) -> Vec<Classification> {
        match self.backend.complete(&build_prompt(batch)).await {
            Ok(reply) => {
                let classes = parse_reply(batch.len(), &reply);
                let seo = classes.iter().filter(|c| c.is_seo()).count();
                debug!(batch = batch.len(), seo, "Batch classified");
                classes
            },
            Err(err) => {
                warn!(batch = batch.len(), error = %err, "Classification failed; treating batch as posts");
                vec![Classification::Post; batch.len()]
            },
        }
    }

    /// Keeps SEO hits with `page` parameters removed, de-duplicated by the cleaned URL.
    pub async fn filter_seo(&self, hits: &[SearchHit]) -> Vec<SearchHit> {
        if hits.is_empty() {
            return Vec::new();
        }

        let urls: Vec<&str> = hits.iter().map(|hit| hit.url.as_str()).collect();
        let classes: FxHashMap<String, Classification> = self.classify(&urls).await.into_iter().collect();

        let mut seen = FxHashSet::default();
        let kept: Vec<SearchHit> = hits
            .iter()
            .filter(|hit| classes.get(&hit.url).is_some_and(|class| class.is_seo()))
            .filter_map(|hit| {
                let clean = remove_page_param(&hit.url);
                seen.insert(clean.clone()).then(|| hit.clone().with_url(clean))
            })
            .collect();

        info!(input = hits.len(), kept = kept.len(), "SEO filter applied");
        kept
    }
}
