//! Per-domain collection: search, filter, classify.

use crate::error::{CollectError, CollectErrorExt};
use futures::{StreamExt, stream};
use tracing::{error, info};
use urlc_classifier::{CompletionBackend, GroqClient, UrlClassifier};
use urlc_domain::config::{AppConfig, AppConfigInner};
use urlc_domain::{DomainReport, SearchHit, SearchMode};
use urlc_filtering::{brand_seo_score, filter_articles, filter_brand_results, filter_by_category, rank_urls, seo_score};
use urlc_kernel::url::normalize_domain;
use urlc_search::{BrandSearcher, SearchBackend, SerperClient, site_search};

/// Switches for one collection run, seeded from the config and overridden by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOptions {
    /// Maximum URLs requested per domain.
    pub limit: usize,
    /// Return raw search results.
    pub no_filter: bool,
    /// Article mode keeps only positively identified posts.
    pub strict: bool,
    /// Let the LLM classifier filter SEO mode when a key is available.
    pub use_ai: bool,
    /// Brand to search in SEO mode instead of resolving one.
    pub brand: Option<String>,
    /// Ranked mode keeps at most this many URLs.
    pub top: Option<usize>,
    /// Overrides the brand or ranked minimum score.
    pub min_score: Option<i32>,
    /// Keep only URLs whose path contains one of these.
    pub categories: Vec<String>,
    /// Domains collected at once.
    pub concurrency: usize,
}

impl CollectOptions {
    #[must_use]
    pub fn from_config(config: &AppConfigInner) -> Self {
        Self {
            limit: config.collect.num_results,
            no_filter: false,
            strict: config.filter.strict,
            use_ai: config.groq.enabled,
            brand: None,
            top: config.filter.ranked_top,
            min_score: None,
            categories: Vec::new(),
            concurrency: config.collect.concurrency,
        }
    }
}

/// Runs collections against a search backend and an optional completion backend.
#[derive(Debug)]
pub struct Collector<S = SerperClient, C = GroqClient> {
    config: AppConfig,
    search: S,
    completion: Option<C>,
}

impl Collector {
    /// Builds the HTTP clients; without a Groq key SEO mode uses brand scoring.
    pub fn new(
        config: AppConfig,
        serper_key: impl Into<String>,
        groq_key: Option<String>,
    ) -> Result<Self, CollectError> {
        let search = SerperClient::new(serper_key, config.serper.clone())?;
        let completion = groq_key
            .filter(|key| !key.trim().is_empty())
            .map(|key| GroqClient::new(key, config.groq.clone()))
            .transpose()
            .context("creating Groq client")?;

        Ok(Self::with_backends(config, search, completion))
    }
}

impl<S: SearchBackend, C: CompletionBackend> Collector<S, C> {
    pub const fn with_backends(config: AppConfig, search: S, completion: Option<C>) -> Self {
        Self { config, search, completion }
    }

    #[must_use]
    pub const fn has_classifier(&self) -> bool {
        self.completion.is_some()
    }

    /// Collects one domain. Failures are reported in [`DomainReport::error`].
    pub async fn collect(&self, domain: &str, mode: SearchMode, options: &CollectOptions) -> DomainReport {
        let domain = normalize_domain(domain);
        match self.try_collect(&domain, mode, options).await {
            Ok(hits) => {
                info!(domain = %domain, %mode, found = hits.len(), "Domain collected");
                DomainReport::ok(domain, mode, hits)
            },
            Err(err) => {
                error!(domain = %domain, %mode, error = %err, "Domain collection failed");
                DomainReport::failed(domain, mode, err)
            },
        }
    }

    /// Collects every domain, at most `options.concurrency` at a time, in input order.
    pub async fn collect_all<D: AsRef<str>>(
        &self,
        domains: &[D],
        mode: SearchMode,
        options: &CollectOptions,
    ) -> Vec<DomainReport> {
        stream::iter(domains)
            .map(|domain| self.collect(domain.as_ref(), mode, options))
            .buffered(options.concurrency.max(1))
            .collect()
            .await
    }

    async fn try_collect(
        &self,
        domain: &str,
        mode: SearchMode,
        options: &CollectOptions,
    ) -> Result<Vec<SearchHit>, CollectError> {
        let per_page = self.config.serper.per_page;
        let filter = &self.config.filter;

        let hits = match mode {
            SearchMode::Article => {
                let raw = site_search(&self.search, domain, options.limit, per_page).await?;
                if options.no_filter {
                    raw
                } else {
                    filter_articles(&raw, options.strict, filter.max_per_domain)
                }
            },
            SearchMode::Seo => {
                let raw = BrandSearcher::new(&self.search, per_page)
                    .search_domain(domain, options.brand.as_deref(), options.limit)
                    .await?;
                if options.no_filter { raw } else { self.filter_seo(domain, &raw, options).await }
            },
            SearchMode::Ranked => {
                let raw = site_search(&self.search, domain, options.limit, per_page).await?;
                if options.no_filter {
                    raw
                } else {
                    rank_urls(&raw, options.min_score.unwrap_or(filter.ranked_min_score), options.top)
                }
            },
        };

        Ok(filter_by_category(&hits, &options.categories))
    }

    async fn filter_seo(&self, domain: &str, hits: &[SearchHit], options: &CollectOptions) -> Vec<SearchHit> {
        match &self.completion {
            Some(completion) if options.use_ai && self.config.groq.enabled => {
                UrlClassifier::new(completion, self.config.groq.batch_size).filter_seo(hits).await
            },
            _ => {
                let min_score = options.min_score.unwrap_or(self.config.filter.brand_min_score);
                filter_brand_results(hits, Some(domain), min_score, options.limit)
            },
        }
    }
}

/// Score shown next to a URL: brand score in SEO mode, SEO importance otherwise.
#[must_use]
pub fn display_score(mode: SearchMode, hit: &SearchHit) -> i32 {
    match mode {
        SearchMode::Seo => brand_seo_score(&hit.url, &hit.title, &hit.snippet),
        SearchMode::Article | SearchMode::Ranked => seo_score(&hit.url, &hit.title, &hit.snippet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_config() {
        let mut config = AppConfig::default();
        config.collect.num_results = 30;
        config.collect.concurrency = 4;
        config.filter.strict = true;
        config.filter.ranked_top = Some(5);
        config.groq.enabled = false;

        let options = CollectOptions::from_config(&config);
        assert_eq!(options.limit, 30);
        assert_eq!(options.concurrency, 4);
        assert!(options.strict);
        assert!(!options.use_ai);
        assert_eq!(options.top, Some(5));
        assert!(options.categories.is_empty());
    }

    #[test]
    fn display_score_depends_on_mode() {
        let hit = SearchHit::new("https://a.com/", "", "", "a.com");
        assert_eq!(display_score(SearchMode::Seo, &hit), 100);
        assert_eq!(display_score(SearchMode::Ranked, &hit), 30);
        assert_eq!(display_score(SearchMode::Article, &hit), 30);
    }

    #[test]
    fn blank_groq_key_means_no_classifier() {
        let collector = Collector::new(AppConfig::default(), "serper", Some("  ".to_owned())).unwrap();
        assert!(!collector.has_classifier());

        let collector = Collector::new(AppConfig::default(), "serper", Some("gsk".to_owned())).unwrap();
        assert!(collector.has_classifier());
    }
}
