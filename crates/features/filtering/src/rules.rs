//! Deterministic SEO/POST decisions for URLs whose kind is obvious from their shape.

use urlc_domain::Classification;
use urlc_kernel::url::{ParsedUrl, contains_hangul, is_all_digits};

/// Query keys that only appear on posts or filtered listings.
const POST_PARAMS: &[&str] = &["wr_id", "spt", "sca", "sst", "sod", "sop", "stx", "sfl"];
const SEO_SCRIPTS: &[&str] = &["tag.php", "page.php", "search.php"];
const MEMBER_PAGES: &[&str] = &["login", "register", "password", "profile", "logout"];

fn has_post_param(query: &str) -> bool {
    POST_PARAMS.iter().any(|p| query.contains(&format!("{p}=")))
}

/// Posts: post query keys, `/category/<digits>`, or long title slugs.
#[must_use]
pub fn is_obvious_post(url: &str) -> bool {
    ParsedUrl::parse(url).is_some_and(|p| obvious_post(&p))
}

fn obvious_post(url: &ParsedUrl) -> bool {
    if has_post_param(&url.raw_query) {
        return true;
    }

    let segments = url.content_segments();
    if segments.len() < 2 {
        return false;
    }

    let last = segments[segments.len() - 1];
    let hyphens = last.matches('-').count();
    is_all_digits(last)
        || (hyphens >= 3 && last.chars().count() > 20)
        || (hyphens >= 2 && contains_hangul(last))
}

/// Menu pages: the root, plain board listings, tag/page/search scripts, member pages and
/// single non-numeric sections.
#[must_use]
pub fn is_obvious_seo(url: &str) -> bool {
    ParsedUrl::parse(url).is_some_and(|p| obvious_seo(&p))
}

fn obvious_seo(url: &ParsedUrl) -> bool {
    let path = url.path.as_str();
    if path.is_empty() {
        return true;
    }

    if path.contains("board.php") && url.raw_query.contains("bo_table=") && !has_post_param(&url.raw_query)
    {
        return true;
    }

    if SEO_SCRIPTS.iter().any(|script| path.contains(script)) {
        return true;
    }

    let lowered = path.to_lowercase();
    if MEMBER_PAGES.iter().any(|page| lowered.contains(page)) {
        return true;
    }

    matches!(url.content_segments().as_slice(), [segment] if !is_all_digits(segment))
}

/// Post rules win over SEO rules; `None` means the shape is ambiguous.
#[must_use]
pub fn classify_by_rules(url: &str) -> Option<Classification> {
    let parsed = ParsedUrl::parse(url)?;
    if obvious_post(&parsed) {
        Some(Classification::Post)
    } else if obvious_seo(&parsed) {
        Some(Classification::Seo)
    } else {
        None
    }
}

/// Drops every `page` parameter, keeping the other pairs in order (blank values as `k=`).
///
/// Only the first value of a repeated key is kept. The fragment is dropped. URLs without
/// a query, or that do not parse, are returned unchanged.
#[must_use]
pub fn remove_page_param(url: &str) -> String {
    let Some(parsed) = ParsedUrl::parse(url) else {
        return url.to_owned();
    };
    if parsed.raw_query.is_empty() {
        return url.to_owned();
    }

    let mut kept: Vec<(&str, &str)> = Vec::new();
    for (key, value) in parsed.params() {
        if key != "page" && !kept.iter().any(|(k, _)| *k == key.as_str()) {
            kept.push((key.as_str(), value.as_str()));
        }
    }

    let base = parsed.base();
    if kept.is_empty() {
        return base;
    }
    let query: Vec<String> = kept.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{base}?{}", query.join("&"))
}
