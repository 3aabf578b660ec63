//! Batch prompt construction and reply parsing.

use std::fmt::Write as _;
use urlc_domain::Classification;

const INSTRUCTIONS: &str = "\
Classify each URL as SEO (a category, menu or landing page) or POST (an individual post).

SEO examples (menus and categories, the only URLs to keep):
- / (home)
- /free /notice /event /review (categories)
- /자유게시판/ /공지사항/ /먹튀제보/ (Korean categories)
- /bbs/board.php?bo_table=notice (board listing)
- /login/ /register/ /profile/ (member pages)

POST examples (posts, to be filtered out):
- /mt/5733 /event/219 (ends with a number)
- /먹튀-사이트-유형별-특징/ (long hyphenated title)
- /bsite/body-바디-먹튀-검증/ (post title)
- ?wr_id=123 (post id)

When unsure answer POST. Answer SEO only for clear categories.

URLs:
";

const ANSWER_FORMAT: &str = "\nAnswer each number with SEO or POST only:";

/// Numbered-list prompt for one batch.
#[must_use]
pub fn build_prompt<S: AsRef<str>>(urls: &[S]) -> String {
    let mut prompt = String::from(INSTRUCTIONS);
    for (index, url) in urls.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", index + 1, url.as_ref());
    }
    prompt.push_str(ANSWER_FORMAT);
    prompt
}

/// One classification per URL of the batch, in order.
///
/// The first line starting with `N.` or `N ` decides entry `N`; it is SEO only when it
/// mentions `SEO` in any case. Numbers without a line are POST.
#[must_use]
pub fn parse_reply(count: usize, reply: &str) -> Vec<Classification> {
    let lines: Vec<&str> = reply.trim().lines().map(str::trim).collect();

    (1..=count)
        .map(|number| {
            let dotted = format!("{number}.");
            let spaced = format!("{number} ");
            let line = lines.iter().find(|line| line.starts_with(&dotted) || line.starts_with(&spaced));
            match line {
                Some(line) if line.to_uppercase().contains("SEO") => Classification::Seo,
                _ => Classification::Post,
            }
        })
        .collect()
}
