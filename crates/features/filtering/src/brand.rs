//! Short-path scoring for brand and site searches.

use fxhash::FxHashSet;
use tracing::debug;
use urlc_domain::SearchHit;
use urlc_kernel::url::{ParsedUrl, contains_hangul};

const IMPORTANT_KEYWORDS: &[&str] =
    &["링크모음", "자유게시판", "후기게시판", "이벤트게시판", "login", "main", "show", "link"];
const SYSTEM_KEYWORDS: &[&str] = &["register", "password", "logout", "captcha", "qalist"];
const FILTER_QUERY_KEYS: &[&str] = &["sfl=", "sst=", "sod=", "sca="];

/// Bonus for hits on the searched domain.
pub const TARGET_DOMAIN_BONUS: i32 = 50;

/// Score favouring shallow category pages over posts.
///
/// Unparsable URLs score `0`.
#[must_use]
pub fn brand_seo_score(url: &str, title: &str, _snippet: &str) -> i32 {
    ParsedUrl::parse(url).map_or(0, |p| score_parsed(&p, title))
}

fn score_parsed(url: &ParsedUrl, title: &str) -> i32 {
    let path = url.path.as_str();
    let segments = url.content_segments();
    let numeric_tail = url.ends_with_numeric_segment();

    let mut score = match segments.len() {
        0 => 100,
        1 => 80,
        2 if !numeric_tail => 60,
        _ => 10,
    };

    if numeric_tail {
        score -= 50;
    }

    for segment in &segments {
        let hyphens = segment.matches('-').count();
        if hyphens >= 3 || (hyphens >= 2 && contains_hangul(segment)) {
            score -= 80;
        }
        if segment.chars().count() > 20 {
            score -= 70;
        }
    }

    if has_price(path) {
        score -= 100;
    }
    if has_scam_report_slug(path) {
        score -= 100;
    }

    let query = url.raw_query.as_str();
    if !query.is_empty() {
        if has_page_number(query) {
            score -= 50;
        }
        if FILTER_QUERY_KEYS.iter().any(|key| query.contains(key)) {
            score -= 60;
        }
        if query.contains("wr_id=") {
            score -= 80;
        }
    }

    let text = format!("{path} {title}").to_lowercase();
    score += 15 * count_matches(IMPORTANT_KEYWORDS, &text);

    let lowered = path.to_lowercase();
    score -= 100 * count_matches(SYSTEM_KEYWORDS, &lowered);

    score
}

fn count_matches(keywords: &[&str], haystack: &str) -> i32 {
    keywords.iter().map(|kw| i32::from(haystack.contains(kw))).sum()
}

/// `<digits>만원` or `<digits>천원`: a price in a post title.
fn has_price(path: &str) -> bool {
    ["만원", "천원"].iter().any(|unit| {
        path.match_indices(unit)
            .any(|(at, _)| path[..at].chars().next_back().is_some_and(|c| c.is_ascii_digit()))
    })
}

/// `-먹튀-` followed later by `com`: a scam report about a named site.
fn has_scam_report_slug(path: &str) -> bool {
    let lowered = path.to_lowercase();
    lowered
        .find("-먹튀-")
        .is_some_and(|at| lowered[at + "-먹튀-".len()..].contains("com"))
}

/// `page=` followed by a digit anywhere in the query.
fn has_page_number(query: &str) -> bool {
    query.match_indices("page=").any(|(at, key)| {
        query[at + key.len()..].chars().next().is_some_and(|c| c.is_ascii_digit())
    })
}

/// Raw path without trailing slashes, every `/<digits>` run replaced by `/{id}`.
fn path_pattern(raw_path: &str) -> String {
    let path = raw_path.trim_end_matches('/');
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '/' && chars.peek().is_some_and(char::is_ascii_digit) {
            while chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
            }
            out.push_str("{id}");
        }
    }
    out
}

/// Scores, filters and de-duplicates brand search hits.
///
/// Hits whose domain contains `target_domain` earn [`TARGET_DOMAIN_BONUS`]. Hits below
/// `min_score` are dropped, the rest are sorted best first (ties keep input order), and
/// only the first hit per path pattern survives.
#[must_use]
pub fn filter_brand_results(
    hits: &[SearchHit],
    target_domain: Option<&str>,
    min_score: i32,
    max_results: usize,
) -> Vec<SearchHit> {
    let target = target_domain.filter(|t| !t.is_empty());

    let mut scored: Vec<(i32, SearchHit, String)> = hits
        .iter()
        .filter_map(|hit| {
            let parsed = ParsedUrl::parse(&hit.url)?;
            let mut score = score_parsed(&parsed, &hit.title);
            if target.is_some_and(|t| hit.domain.contains(t)) {
                score += TARGET_DOMAIN_BONUS;
            }
            Some((score, hit.clone(), path_pattern(&parsed.raw_path)))
        })
        .filter(|(score, ..)| *score >= min_score)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut seen = FxHashSet::default();
    let kept: Vec<SearchHit> = scored
        .into_iter()
        .filter(|(_, _, pattern)| seen.insert(pattern.clone()))
        .map(|(_, hit, _)| hit)
        .take(max_results)
        .collect();

    debug!(input = hits.len(), kept = kept.len(), min_score, "Brand filter applied");
    kept
}
