use urlc_domain::{Classification, SearchHit};
use urlc_filtering::rules::{is_obvious_post, is_obvious_seo};
use urlc_filtering::{classify_by_rules, filter_articles, filter_brand_results, rank_urls, seo_score};

fn hit(url: &str, title: &str) -> SearchHit {
    let domain = urlc_kernel::url::netloc_of(url);
    SearchHit::new(url, title, "", domain)
}

#[test]
fn seo_ranking_puts_boards_before_posts() {
    let hits = vec![
        hit("https://mtcheck.net/", "먹튀검증 - 메인"),
        hit("https://mtcheck.net/kr1/bbs/board.php?bo_table=Verification", "먹튀검증 게시판"),
        hit("https://mtcheck.net/kr1/bbs/board.php?bo_table=mt_site", "토토사이트 목록"),
        hit("https://mtcheck.net/kr1/bbs/board.php?bo_table=report", "먹튀신고 게시판"),
        hit("https://example.com/토토사이트", "토토사이트 추천"),
        hit("https://mtgal.com/mtcs/228", "개별 게시글 1"),
        hit("https://mtgal.com/mt/4446", "개별 게시글 2"),
        hit("https://example.com/bbs/board.php?bo_table=free&wr_id=123", "자유게시판 글"),
        hit("https://mtcheck.net/bbs/register.php", "회원가입"),
        hit("https://mtcheck.net/bbs/login.php", "로그인"),
    ];

    let top = rank_urls(&hits, 0, Some(5));
    assert_eq!(top.len(), 5);
    for pair in top.windows(2) {
        assert!(seo_score(&pair[0].url, &pair[0].title, "") >= seo_score(&pair[1].url, &pair[1].title, ""));
    }
    assert!(top.iter().all(|h| !h.url.contains("mtcs") && !h.url.contains("login")));
}

#[test]
fn rules_match_known_site_layouts() {
    assert_eq!(classify_by_rules("https://mt-to.com/"), Some(Classification::Seo));
    assert_eq!(classify_by_rules("https://mt-to.com/bsite"), Some(Classification::Seo));
    assert_eq!(classify_by_rules("https://mt-to.com/security"), Some(Classification::Seo));
    assert_eq!(
        classify_by_rules("https://mt-to.com/bbs/board.php?bo_table=notice"),
        Some(Classification::Seo)
    );
    assert!(is_obvious_post("https://mt-to.com/bsite/body-바디-먹튀-body-2020com-먹튀검증-25만원/"));
    assert!(!is_obvious_seo("https://mt-to.com/notice/트러스트-제휴종료/?page=11"));
}

#[test]
fn article_filter_on_board_site() {
    let hits = vec![
        hit("https://a.com/", "home"),
        hit("https://a.com/bbs/board.php?bo_table=free", "free board"),
        hit("https://a.com/bbs/board.php?bo_table=free&wr_id=1", "post 1"),
        hit("https://a.com/bbs/board.php?bo_table=free&wr_id=2&page=3", "post 2"),
        hit("https://a.com/bbs/board.php?bo_table=free&wr_id=2&page=4", "post 2 again"),
        hit("https://a.com/bbs/search.php?stx=x", "search"),
        hit("https://a.com/data/file/free/a.jpg", "image"),
    ];

    let kept = filter_articles(&hits, false, 50);
    let titles: Vec<&str> = kept.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, ["post 1", "post 2", "post 2 again"]);
}

#[test]
fn brand_filter_keeps_short_target_paths() {
    let hits = vec![
        hit("https://mtgal.com/", "먹튀갤"),
        hit("https://mtgal.com/link", "링크모음"),
        hit("https://mtgal.com/mt/4446", "post"),
        hit("https://blog.other.com/mtgal-review-long-title-here", "review"),
    ];

    let kept = filter_brand_results(&hits, Some("mtgal.com"), 50, 100);
    let urls: Vec<&str> = kept.iter().map(|h| h.url.as_str()).collect();
    // `/link`: 80 + 15 ("link") + 15 ("링크모음") + 50 beats the root's 100 + 50
    assert_eq!(urls, ["https://mtgal.com/link", "https://mtgal.com/"]);
}

#[test]
fn brand_filter_puts_root_before_plain_category() {
    let hits = vec![
        hit("https://mtgal.com/free", "board"),
        hit("https://mtgal.com/", "먹튀갤"),
        hit("https://mtgal.com/mt/4446", "post"),
    ];

    let kept = filter_brand_results(&hits, Some("mtgal.com"), 50, 100);
    let urls: Vec<&str> = kept.iter().map(|h| h.url.as_str()).collect();
    assert_eq!(urls, ["https://mtgal.com/", "https://mtgal.com/free"]);
}
