//! Importance ranking for navigational pages.

use crate::sort_by_score_desc;
use tracing::debug;
use urlc_domain::SearchHit;
use urlc_kernel::url::{ParsedUrl, decode_url};

/// Keywords that mark landing, category and key feature pages.
const IMPORTANT_KEYWORDS: &[(&str, i32)] = &[
    ("메인", 20),
    ("홈", 15),
    ("소개", 15),
    ("안내", 15),
    ("main", 20),
    ("home", 15),
    ("about", 15),
    ("intro", 15),
    ("먹튀검증", 25),
    ("먹튀제보", 25),
    ("먹튀신고", 25),
    ("토토사이트", 20),
    ("카지노사이트", 20),
    ("안전놀이터", 20),
    ("보증업체", 20),
    ("검증업체", 20),
    ("추천업체", 20),
    ("verification", 25),
    ("report", 20),
    ("review", 15),
    ("notice", 15),
    ("event", 10),
    ("faq", 10),
];

/// `bo_table` bonuses; only the first match counts.
const IMPORTANT_BOARDS: &[(&str, i32)] = &[
    ("verification", 25),
    ("mt_site", 25),
    ("report", 20),
    ("notice", 15),
    ("event", 10),
    ("info", 10),
    ("review", 15),
    ("qa", 10),
];

const SYSTEM_WORDS: &[&str] = &[
    "login",
    "logout",
    "register",
    "password",
    "member",
    "captcha",
    "current_connect",
    "new.php",
    "qalist",
    "profile",
    "memo",
    "point",
    "scrap",
    "formmail",
    "qrcode",
];

const FILTER_PARAMS: &[&str] = &["sca", "page", "sfl", "stx", "sop", "sst", "sod"];
const UNIMPORTANT_BOARDS: &[&str] = &["chulsuk", "attendance", "출석", "coupon", "쿠폰"];

const ROOT_PATHS: &[&str] = &["", "/index.php", "/index.html", "/main"];

const ROOT_BONUS: i32 = 30;
const SECTION_BONUS: i32 = 20;
const BOARD_LIST_BONUS: i32 = 25;
const ARTICLE_PENALTY: i32 = -10;
const SYSTEM_PENALTY: i32 = -50;
const DUPLICATE_PENALTY: i32 = -80;

/// Importance of a page for navigation; higher means more likely a menu or landing page.
///
/// Unparsable URLs score `0`.
#[must_use]
pub fn seo_score(url: &str, title: &str, snippet: &str) -> i32 {
    ParsedUrl::parse(url).map_or(0, |p| score_parsed(&p, title, snippet))
}

fn score_parsed(url: &ParsedUrl, title: &str, snippet: &str) -> i32 {
    let path = url.path.to_lowercase();
    let text = format!("{title} {snippet}").to_lowercase();
    let mut score = 0;

    if ROOT_PATHS.contains(&path.as_str()) {
        score += ROOT_BONUS;
    }

    let depth = path.split('/').filter(|s| !s.is_empty() && !s.ends_with(".php")).count();
    if depth == 1 {
        score += SECTION_BONUS;
    }

    let board = url.param("bo_table").map(str::to_lowercase);
    if path.contains("board.php")
        && let Some(board) = &board
    {
        if url.has_param("wr_id") {
            score += ARTICLE_PENALTY;
        } else {
            score += BOARD_LIST_BONUS;
            if let Some((_, bonus)) = IMPORTANT_BOARDS.iter().find(|(name, _)| board.contains(name))
            {
                score += bonus;
            }
        }
    }

    if url.ends_with_numeric_segment() {
        score += ARTICLE_PENALTY;
    }

    score += IMPORTANT_KEYWORDS
        .iter()
        .filter(|(keyword, _)| text.contains(keyword) || path.contains(keyword))
        .map(|(_, points)| points)
        .sum::<i32>();

    if SYSTEM_WORDS.iter().any(|word| path.contains(word)) {
        score += SYSTEM_PENALTY;
    }

    if FILTER_PARAMS.iter().any(|p| url.has_param(p)) {
        score += DUPLICATE_PENALTY;
    }

    if board.is_some_and(|board| UNIMPORTANT_BOARDS.iter().any(|b| board.contains(b))) {
        score += DUPLICATE_PENALTY;
    }

    score
}

/// Keeps hits scoring at least `min_score`, best first, optionally capped at `top_n`.
///
/// Ties keep their input order. A `top_n` of `Some(0)` means no cap.
#[must_use]
pub fn rank_urls(hits: &[SearchHit], min_score: i32, top_n: Option<usize>) -> Vec<SearchHit> {
    let mut scored: Vec<(i32, SearchHit)> = hits
        .iter()
        .filter_map(|hit| {
            let parsed = ParsedUrl::parse(&hit.url)?;
            Some((score_parsed(&parsed, &hit.title, &hit.snippet), hit.clone()))
        })
        .filter(|(score, _)| *score >= min_score)
        .collect();

    sort_by_score_desc(&mut scored);
    if let Some(n) = top_n.filter(|&n| n > 0) {
        scored.truncate(n);
    }

    debug!(input = hits.len(), kept = scored.len(), min_score, "Ranked by SEO score");
    scored.into_iter().map(|(_, hit)| hit).collect()
}

/// Keeps hits whose decoded path contains any of `categories`, ignoring case.
///
/// An empty category list keeps everything.
#[must_use]
pub fn filter_by_category(hits: &[SearchHit], categories: &[String]) -> Vec<SearchHit> {
    if categories.is_empty() {
        return hits.to_vec();
    }

    let wanted: Vec<String> = categories.iter().map(|c| c.to_lowercase()).collect();
    hits.iter()
        .filter(|hit| {
            ParsedUrl::parse(&hit.url).is_some_and(|p| {
                let path = decode_url(&p.raw_path).to_lowercase();
                wanted.iter().any(|category| path.contains(category.as_str()))
            })
        })
        .cloned()
        .collect()
}
