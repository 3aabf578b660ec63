//! # URL Filtering
//!
//! Deterministic heuristics over search hits. Nothing here performs I/O.
//!
//! * [`article`]: keeps individual posts and drops system, resource and listing pages.
//! * [`seo`]: scores pages by navigational importance and ranks them.
//! * [`brand`]: prefers short paths for brand and site searches.
//! * [`rules`]: classifies obvious SEO and POST URLs before any model is asked.
//!
//! URLs that do not parse as absolute `http(s)` URLs with a host never survive a filter.

pub mod article;
pub mod brand;
pub mod rules;
pub mod seo;

pub use article::{filter_articles, is_article_url};
pub use brand::{brand_seo_score, filter_brand_results};
pub use rules::{classify_by_rules, remove_page_param};
pub use seo::{filter_by_category, rank_urls, seo_score};

use urlc_domain::SearchHit;

/// Stable descending sort by score, keeping input order among equal scores.
pub(crate) fn sort_by_score_desc(scored: &mut [(i32, SearchHit)]) {
    scored.sort_by(|a, b| b.0.cmp(&a.0));
}
