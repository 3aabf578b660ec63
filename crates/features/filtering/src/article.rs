//! Article filter: keep posts, drop system and listing pages.

use fxhash::{FxHashMap, FxHashSet};
use tracing::debug;
use urlc_domain::SearchHit;
use urlc_kernel::url::{ParsedUrl, contains_hangul, is_all_digits};

/// CMS directories, auth and API endpoints.
const SYSTEM_PATHS: &[&str] = &[
    "/adm/",
    "/admin/",
    "/plugin/",
    "/lib/",
    "/extend/",
    "/modules/",
    "/widgets/",
    "/addons/",
    "/layouts/",
    "/wp-admin",
    "/wp-includes",
    "/wp-content/",
    "/wp-json",
    "/files/attach",
    "/files/cache",
    "/data/file/",
    "/login",
    "/logout",
    "/signin",
    "/signout",
    "/signup",
    "/register",
    "/auth/",
    "/oauth/",
    "/password",
    "/api/",
    "/ajax/",
    "/async/",
    "/xmlrpc",
    "/feed",
    "/rss",
    "/captcha",
    "/robots.txt",
    "/favicon",
    "/sitemap.xml",
];

/// Board scripts under `/bbs/` that never hold content.
const SYSTEM_SCRIPTS: &[&str] = &[
    "login", "logout", "register", "password", "memo", "point", "scrap", "poll", "formmail",
    "qrcode", "new", "profile", "qalist", "link", "search", "tag", "shingo", "qa", "page",
];

const STATIC_EXTENSIONS: &[&str] = &[
    ".xml", ".json", ".css", ".js", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".ttf",
    ".pdf", ".zip", ".rar",
];

const ID_PARAMS: &[&str] =
    &["wr_id", "id", "no", "idx", "seq", "num", "article_id", "post_id", "document_srl"];

const LIST_PARAMS: &[&str] = &["page", "sca", "sfl", "stx", "sop", "sst", "sod", "category", "cat"];
pub(crate) const TRACKING_PARAMS: &[&str] = &["utm_", "fbclid", "gclid", "ref", "device"];

const INDEX_PATHS: &[&str] = &["", "/index.php", "/index.html", "/show.php", "/main"];
const LIST_ENDINGS: &[&str] = &["posts", "list", "page", "items", "all", "archive"];

/// Articles sharing one URL shape at least this often are treated as posts.
const STRUCTURE_THRESHOLD: usize = 3;

pub(crate) fn is_hash_like(segment: &str) -> bool {
    segment.len() >= 8 && segment.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn has_digit_run(s: &str, len: usize) -> bool {
    let mut run = 0;
    for c in s.chars() {
        run = if c.is_ascii_digit() { run + 1 } else { 0 };
        if run >= len {
            return true;
        }
    }
    false
}

/// Resource, admin, auth and board-system URLs.
#[must_use]
pub fn is_system_url(url: &str) -> bool {
    ParsedUrl::parse(url).is_some_and(|p| system_url(&p))
}

fn system_url(url: &ParsedUrl) -> bool {
    let path = url.raw_path.to_lowercase();

    if SYSTEM_PATHS.iter().any(|p| path.contains(p)) {
        return true;
    }
    if STATIC_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) || path.contains(".woff") {
        return true;
    }
    path.contains("/bbs/")
        && SYSTEM_SCRIPTS
            .iter()
            .any(|name| path.contains(&format!("/{name}.php")) || path.contains(&format!("/{name}/")))
}

/// Post id in the query, a numeric tail, or a slug or hash-like last segment.
#[must_use]
pub fn has_content_identifier(url: &str) -> bool {
    ParsedUrl::parse(url).is_some_and(|p| content_identifier(&p))
}

fn content_identifier(url: &ParsedUrl) -> bool {
    if ID_PARAMS.iter().any(|p| url.has_param(p)) || url.ends_with_numeric_segment() {
        return true;
    }

    let segments: Vec<&str> = url.segments().collect();
    let Some(last) = segments.last() else {
        return false;
    };

    if is_hash_like(last) {
        return true;
    }

    if segments.len() >= 2 {
        let hyphens = last.matches('-').count();
        if hyphens >= 2 || (hyphens >= 1 && contains_hangul(last)) {
            return true;
        }
        if segments.len() >= 3 && last.chars().count() > 10 {
            return true;
        }
    }
    false
}

/// Root, index, board listing and category pages without a content identifier.
#[must_use]
pub fn is_list_page(url: &str) -> bool {
    ParsedUrl::parse(url).is_some_and(|p| list_page(&p))
}

fn list_page(url: &ParsedUrl) -> bool {
    if content_identifier(url) {
        return false;
    }

    if INDEX_PATHS.contains(&url.path.as_str()) {
        return true;
    }

    if url.path.to_lowercase().contains("board.php") && !url.has_param("wr_id") {
        return true;
    }

    let segments = url.content_segments();
    let depth = segments.len();
    if depth == 1 {
        return true;
    }

    if let Some(last) = segments.last() {
        if LIST_ENDINGS.contains(&last.to_lowercase().as_str()) {
            return true;
        }

        if depth == 2 {
            let len = last.chars().count();
            if last.contains('_') && !has_digit_run(last, 3) {
                return true;
            }
            if last.chars().all(urlc_kernel::url::is_hangul) && len <= 10 {
                return true;
            }
            if last.chars().all(|c| c.is_ascii_alphabetic() || c == '_') && len <= 20 {
                return true;
            }
        }
    }

    let keys = url.param_keys();
    !keys.is_empty()
        && keys.iter().all(|key| {
            let key = key.to_lowercase();
            LIST_PARAMS.contains(&key.as_str()) || TRACKING_PARAMS.contains(&key.as_str())
        })
}

/// Not a system URL, not a listing, and carries a content identifier.
#[must_use]
pub fn is_article_url(url: &str) -> bool {
    ParsedUrl::parse(url)
        .is_some_and(|p| !system_url(&p) && !list_page(&p) && content_identifier(&p))
}

/// Shape of a URL with ids, slugs and hashes replaced by placeholders.
///
/// `https://a.com/free/12345?wr_id=1` becomes `a.com/free/{id}?wr_id`.
#[must_use]
pub fn url_structure(url: &str) -> Option<String> {
    ParsedUrl::parse(url).map(|p| structure_of(&p))
}

fn structure_of(url: &ParsedUrl) -> String {
    let segments: Vec<&str> = url
        .segments()
        .map(|seg| {
            if seg.ends_with(".php") {
                seg
            } else if is_all_digits(seg) {
                "{id}"
            } else if seg.chars().count() > 10 && (seg.contains('-') || contains_hangul(seg)) {
                "{slug}"
            } else if is_hash_like(seg) {
                "{hash}"
            } else {
                seg
            }
        })
        .collect();

    let mut keys = url.param_keys();
    keys.sort_unstable();

    format!("{}/{}?{}", url.netloc, segments.join("/"), keys.join("&"))
}

/// Dedup key: `scheme://netloc/path` with tracking params dropped and the rest sorted by key.
#[must_use]
pub fn normalize_for_dedup(url: &str) -> Option<String> {
    ParsedUrl::parse(url).map(|p| normalized_of(&p))
}

fn normalized_of(url: &ParsedUrl) -> String {
    let mut pairs: Vec<(&str, &str)> = url
        .param_keys()
        .into_iter()
        .filter(|key| {
            let key = key.to_lowercase();
            !TRACKING_PARAMS.iter().any(|t| key.starts_with(t))
        })
        .filter_map(|key| url.param(key).map(|value| (key, value)))
        .collect();

    if pairs.is_empty() {
        return url.base();
    }

    pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
    let query: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{}?{}", url.base(), query.join("&"))
}

/// Keeps article-like hits in input order.
///
/// Fragments are stripped from kept URLs, duplicates (by [`normalize_for_dedup`]) are
/// skipped, and at most `max_per_domain` hits survive per host. In `strict` mode only
/// hits positively identified as articles are kept.
#[must_use]
pub fn filter_articles(hits: &[SearchHit], strict: bool, max_per_domain: usize) -> Vec<SearchHit> {
    let mut structures: FxHashMap<String, usize> = FxHashMap::default();
    for hit in hits {
        if let Some(parsed) = ParsedUrl::parse(&hit.url) {
            *structures.entry(structure_of(&parsed)).or_default() += 1;
        }
    }

    let mut seen = FxHashSet::default();
    let mut per_host: FxHashMap<String, usize> = FxHashMap::default();
    let mut kept = Vec::new();

    for hit in hits {
        let url = hit.url.split('#').next().unwrap_or_default();
        let Some(parsed) = ParsedUrl::parse(url) else {
            continue;
        };

        if !seen.insert(normalized_of(&parsed)) {
            continue;
        }

        let count = per_host.entry(parsed.netloc.clone()).or_default();
        if *count >= max_per_domain {
            continue;
        }

        if system_url(&parsed) {
            continue;
        }

        let is_article = parsed.has_param("wr_id")
            || structures.get(&structure_of(&parsed)).copied().unwrap_or_default()
                >= STRUCTURE_THRESHOLD
            || content_identifier(&parsed);

        if !is_article && (strict || list_page(&parsed)) {
            continue;
        }

        kept.push(hit.clone().with_url(url));
        *count += 1;
    }

    debug!(input = hits.len(), kept = kept.len(), strict, "Article filter applied");
    kept
}
