//! Brand discovery and brand-driven domain search.
//!
//! A domain's brand is voted from the titles of its `site:` results, falling back to a
//! quoted search for the domain's name and finally to the name itself. The brand then
//! drives a quoted search whose hits on the domain are merged with a lenient site search.

use crate::client::{OrganicResult, SearchBackend, SearchQuery};
use crate::error::SearchError;
use crate::paging::{Paginator, PagingPolicy};
use fxhash::FxHashSet;
use tracing::{debug, info};
use urlc_domain::SearchHit;
use urlc_kernel::url::{ParsedUrl, is_all_digits};

const TITLE_SEPARATORS: &[&str] = &[" - ", " | ", " : ", ": ", ":"];
const ROOT_LIKE_PATHS: &[&str] = &["", "/show", "/index.php", "/main", "/home"];

const GENERIC_WORDS: &[&str] =
    &["먹튀검증", "먹튀신고", "토토사이트", "안전놀이터", "카지노", "먹튀", "토토", "검증", "사이트"];

const BAD_BRANDS: &[&str] = &[
    "충전방법",
    "이벤트",
    "공지사항",
    "로그인",
    "회원가입",
    "게시판",
    "분석픽",
    "스포츠",
    "라이온",
    "자유게시판",
    "먹튀사이트",
    "신고",
    "제보",
    "안내",
    "소개",
];

/// Korean particles that end content titles rather than names.
const TRAILING_PARTICLES: &[char] = &['는', '은', '가', '을', '를', '의'];
const LOANWORD_ENDINGS: &[&str] = &["데이", "토이", "키", "비"];

const OUTER_TRIM: &[char] =
    &['-', '|', ':', '【', '】', '[', ']', '(', ')', '（', '）', '「', '」', '『', '』'];
const INNER_TRIM: &[char] = &['-', '|', ':', '【', '】', '[', ']'];

/// Votes below this fall back to a quoted domain-name search.
const MIN_BRAND_SCORE: f64 = 2.0;

/// Label used for category pages synthesized from post URLs.
const CATEGORY_TITLE_SUFFIX: &str = "게시판";

fn trim_brand(text: &str, extra: &[char]) -> String {
    text.trim_matches(|c: char| c.is_whitespace() || extra.contains(&c)).to_owned()
}

/// Strips decoration around a title fragment; long fragments keep their first word.
///
/// Fragments with an ellipsis are rejected.
#[must_use]
pub fn clean_brand_name(text: &str) -> Option<String> {
    let mut text = trim_brand(text, OUTER_TRIM);
    if text.contains("...") {
        return None;
    }

    if text.chars().count() > 15
        && let Some(first) = text.split_whitespace().next()
    {
        text = first.to_owned();
    }

    let text = trim_brand(&text, INNER_TRIM);
    (!text.is_empty()).then_some(text)
}

fn brand_length_ok(brand: &str) -> bool {
    (2..=10).contains(&brand.chars().count())
}

/// `Abc-12`: a title like a tournament or model name.
fn looks_like_code(text: &str) -> bool {
    let letters = text.chars().take_while(char::is_ascii_alphabetic).count();
    if letters == 0 {
        return false;
    }
    let mut rest = text.chars().skip(letters);
    rest.next() == Some('-') && rest.next().is_some_and(|c| c.is_ascii_digit())
}

/// Whether a voted candidate reads like a site name.
#[must_use]
pub fn is_likely_brand(text: &str) -> bool {
    if text.is_empty() || text.contains(' ') || !brand_length_ok(text) {
        return false;
    }

    let particle = text.ends_with(TRAILING_PARTICLES);
    let loanword = LOANWORD_ENDINGS.iter().any(|ending| text.ends_with(ending));
    if particle && !loanword {
        return false;
    }

    if looks_like_code(text) || text.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }

    !GENERIC_WORDS.contains(&text) && !BAD_BRANDS.contains(&text)
}

/// `https://www.mtgal08.com/x` becomes `mtgal`.
#[must_use]
pub fn extract_brand_name(domain: &str) -> String {
    let host = domain.replace("https://", "").replace("http://", "");
    let host = host.split('/').next().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    let name = host.split('.').next().unwrap_or_default();
    name.trim_end_matches(|c: char| c.is_ascii_digit()).to_owned()
}

/// Splits a title on the first separator it contains, after cutting ` > ` breadcrumbs.
fn title_parts(title: &str) -> Vec<&str> {
    let title = title.split(" > ").next().unwrap_or_default().trim();
    TITLE_SEPARATORS
        .iter()
        .find(|sep| title.contains(*sep))
        .map_or_else(|| vec![title], |sep| title.split(sep).map(str::trim).collect())
}

/// Candidate brands in first-seen order with their vote weight.
#[derive(Debug, Default)]
struct BrandVotes(Vec<(String, u32)>);

impl BrandVotes {
    fn add(&mut self, brand: String, weight: u32) {
        match self.0.iter_mut().find(|(name, _)| *name == brand) {
            Some((_, votes)) => *votes += weight,
            None => self.0.push((brand, weight)),
        }
    }

    /// Best plausible brand; names of 2 to 6 chars weigh 1.5x, earlier wins ties.
    fn best(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (brand, votes) in &self.0 {
            if !is_likely_brand(brand) {
                continue;
            }
            let mut score = f64::from(*votes);
            if brand.chars().count() <= 6 {
                score *= 1.5;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((brand, score));
            }
        }
        best
    }
}

/// Brand-aware searches over one backend.
#[derive(Debug)]
pub struct BrandSearcher<'a, B> {
    backend: &'a B,
    per_page: usize,
}

impl<'a, B: SearchBackend> BrandSearcher<'a, B> {
    pub fn new(backend: &'a B, per_page: usize) -> Self {
        Self { backend, per_page: per_page.max(1) }
    }

    async fn first_page(&self, q: String) -> Result<Vec<SearchHit>, SearchError> {
        let results = self.backend.search(&SearchQuery::new(q, self.per_page)).await?;
        Ok(results.into_iter().map(OrganicResult::into_hit).collect())
    }

    /// Brand voted from the titles of the domain's first `site:` page.
    ///
    /// Weak or missing votes fall back to [`Self::brand_from_domain_search`]. Backend
    /// errors yield `None`.
    pub async fn site_title(&self, domain: &str) -> Option<String> {
        let hits = match self.first_page(format!("site:{domain}")).await {
            Ok(hits) if !hits.is_empty() => hits,
            Ok(_) => return None,
            Err(err) => {
                debug!(domain, error = %err, "Site title lookup failed");
                return None;
            },
        };

        let mut votes = BrandVotes::default();
        for hit in &hits {
            let path = ParsedUrl::parse(&hit.url)
                .map(|p| p.raw_path.trim_end_matches('/').to_owned())
                .unwrap_or_default();
            let weight = if ROOT_LIKE_PATHS.contains(&path.as_str()) { 3 } else { 1 };

            for part in title_parts(&hit.title) {
                if let Some(brand) = clean_brand_name(part).filter(|b| brand_length_ok(b)) {
                    votes.add(brand, weight);
                }
            }
        }

        let best = votes.best().map(|(brand, score)| (brand.to_owned(), score));
        if best.as_ref().is_none_or(|(_, score)| *score < MIN_BRAND_SCORE)
            && let Some(brand) = self.brand_from_domain_search(domain).await
        {
            return Some(brand);
        }

        let brand = best.map(|(brand, _)| brand);
        debug!(domain, brand = ?brand, "Site title voted");
        brand
    }

    /// Brand taken from the first `brand - tagline` or `brand | tagline` title on the
    /// domain in a quoted search for the domain's name.
    pub async fn brand_from_domain_search(&self, domain: &str) -> Option<String> {
        let host = domain.replace("www.", "");
        let name = extract_brand_name(domain);

        let hits = match self.first_page(format!("\"{name}\"")).await {
            Ok(hits) => hits,
            Err(err) => {
                debug!(domain, error = %err, "Domain name search failed");
                return None;
            },
        };

        for hit in hits.iter().filter(|hit| hit.url.contains(&host)) {
            let head = [" - ", " | "]
                .iter()
                .find_map(|sep| hit.title.split_once(sep).map(|(head, _)| head.trim()));
            if let Some(head) = head
                && let Some(brand) = clean_brand_name(head).filter(|b| brand_length_ok(b))
            {
                return Some(brand);
            }
        }
        None
    }

    /// Quoted search for `brand` across the web.
    pub async fn search_brand(&self, brand: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        Paginator::new(self.backend, PagingPolicy::lenient(self.per_page))
            .collect(&format!("\"{brand}\""), limit)
            .await
    }

    /// `site:` search that tolerates errors and does not stop on stale pages.
    pub async fn lenient_site_search(
        &self,
        domain: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        Paginator::new(self.backend, PagingPolicy::lenient(self.per_page))
            .collect(&format!("site:{domain}"), limit)
            .await
    }

    /// Navigational pages of `domain`: brand hits on the domain, then site hits.
    ///
    /// Every post URL shaped `/category/<digits>` contributes one synthesized category
    /// page `https://<domain>/<category>`.
    pub async fn search_domain(
        &self,
        domain: &str,
        brand_override: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let brand = match brand_override.map(str::trim).filter(|b| !b.is_empty()) {
            Some(brand) => brand.to_owned(),
            None => match self.site_title(domain).await {
                Some(brand) => brand,
                None => extract_brand_name(domain),
            },
        };
        info!(domain, brand = %brand, "Searching domain by brand");

        let mut hits = Vec::new();
        let mut seen = FxHashSet::default();
        let mut categories = FxHashSet::default();

        for hit in self.search_brand(&brand, limit).await? {
            if hit.domain.contains(domain) && seen.insert(hit.url.clone()) {
                hits.push(hit);
            }
        }

        for hit in self.lenient_site_search(domain, limit).await? {
            let category = ParsedUrl::parse(&hit.url).and_then(|p| post_category(&p.raw_path));
            if seen.insert(hit.url.clone()) {
                hits.push(hit);
            }

            if let Some(category) = category
                && categories.insert(category.clone())
            {
                let url = format!("https://{domain}/{category}");
                if seen.insert(url.clone()) {
                    let title = format!("{category} {CATEGORY_TITLE_SUFFIX}");
                    hits.push(SearchHit::new(url, title, "", domain));
                }
            }
        }

        hits.truncate(limit);
        debug!(domain, found = hits.len(), "Brand domain search finished");
        Ok(hits)
    }
}

/// First segment of a `/<category>/.../<digits>` path.
fn post_category(raw_path: &str) -> Option<String> {
    let segments: Vec<&str> =
        raw_path.trim_end_matches('/').split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [first, .., last] if is_all_digits(last) => Some((*first).to_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_name_from_domain() {
        assert_eq!(extract_brand_name("mtgal.com"), "mtgal");
        assert_eq!(extract_brand_name("https://www.mtgal08.com/free"), "mtgal");
        assert_eq!(extract_brand_name("mt-to.co.kr"), "mt-to");
        assert_eq!(extract_brand_name("1234.com"), "");
    }

    #[test]
    fn cleaning_fragments() {
        assert_eq!(clean_brand_name(" 【먹튀갤】 ").as_deref(), Some("먹튀갤"));
        assert_eq!(clean_brand_name("「토토톡」").as_deref(), Some("토토톡"));
        assert_eq!(clean_brand_name("먹튀갤..."), None);
        assert_eq!(clean_brand_name(" - | "), None);
        assert_eq!(
            clean_brand_name("Mtgal 먹튀검증 커뮤니티 공식 사이트").as_deref(),
            Some("Mtgal")
        );
    }

    #[test]
    fn plausibility_checks() {
        assert!(is_likely_brand("먹튀갤"));
        assert!(is_likely_brand("MTGAL"));
        assert!(!is_likely_brand("먹튀 검증"));
        assert!(!is_likely_brand("a"));
        assert!(!is_likely_brand("안전한놀이터는"));
        assert!(!is_likely_brand("U-20"));
        assert!(!is_likely_brand("7up"));
        assert!(!is_likely_brand("토토사이트"));
        assert!(!is_likely_brand("공지사항"));
    }

    #[test]
    fn title_splitting() {
        assert_eq!(title_parts("먹튀갤 - 먹튀검증 커뮤니티"), ["먹튀갤", "먹튀검증 커뮤니티"]);
        assert_eq!(title_parts("자유게시판 > 먹튀갤 | 홈"), ["자유게시판"]);
        assert_eq!(title_parts("A | B - C"), ["A | B", "C"]);
        assert_eq!(title_parts("Brand: Home"), ["Brand", "Home"]);
        assert_eq!(title_parts("plain"), ["plain"]);
    }

    #[test]
    fn voting_prefers_short_names_and_first_seen() {
        let mut votes = BrandVotes::default();
        votes.add("먹튀검증".to_owned(), 9);
        votes.add("먹튀갤".to_owned(), 1);
        votes.add("토토톡".to_owned(), 1);
        votes.add("먹튀갤".to_owned(), 3);
        votes.add("verylongname".to_owned(), 5);

        let (brand, score) = votes.best().unwrap();
        assert_eq!(brand, "먹튀갤");
        assert!((score - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn categories_come_from_numeric_posts() {
        assert_eq!(post_category("/mt/4446/").as_deref(), Some("mt"));
        assert_eq!(post_category("/a/b/123").as_deref(), Some("a"));
        assert_eq!(post_category("/4446"), None);
        assert_eq!(post_category("/free/post"), None);
        assert_eq!(post_category("/"), None);
    }
}
