//! URL parsing helpers shared by the search and filtering crates.
//!
//! [`ParsedUrl`] wraps [`url::Url`] and exposes the views the filters need: the raw
//! and decoded path, path segments and query parameters with blank values either kept
//! ([`ParsedUrl::params`]) or ignored ([`ParsedUrl::has_param`]).

use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use url::Url;

/// Strips the scheme, surrounding whitespace and trailing slashes from a domain argument.
///
/// The host is lowercased and IDNA-encoded the way [`Url::host_str`] reports it, so the
/// result compares equal to the hosts of parsed search hits.
#[must_use]
pub fn normalize_domain(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let bare = without_scheme.trim_end_matches('/');
    let (authority, rest) = bare.split_once('/').unwrap_or((bare, ""));

    let Some(host) = Url::parse(&format!("http://{authority}")).ok().and_then(|url| {
        let host = url.host_str()?.to_owned();
        Some(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host,
        })
    }) else {
        return bare.to_owned();
    };

    if rest.is_empty() { host } else { format!("{host}/{rest}") }
}

/// Percent-decodes a URL for display; invalid UTF-8 is replaced.
#[must_use]
pub fn decode_url(input: &str) -> Cow<'_, str> {
    percent_decode_str(input).decode_utf8_lossy()
}

/// Hangul syllable range used by the slug heuristics.
#[must_use]
pub const fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7AF}')
}

#[must_use]
pub fn contains_hangul(s: &str) -> bool {
    s.chars().any(is_hangul)
}

#[must_use]
pub fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Host of `url` with its port, or `""` when it does not parse.
#[must_use]
pub fn netloc_of(url: &str) -> String {
    ParsedUrl::parse(url).map(|p| p.netloc).unwrap_or_default()
}

/// An absolute URL with a host, split into the parts the filters inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    /// `host[:port]`.
    pub netloc: String,
    /// Path as sent on the wire, always starting with `/`.
    pub raw_path: String,
    /// Percent-decoded path without trailing slashes; `""` for the root.
    pub path: String,
    /// Query string without the `?`; `""` when absent.
    pub raw_query: String,
    params: Vec<(String, String)>,
}

impl ParsedUrl {
    /// Returns `None` for relative URLs and URLs without a host.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let url = Url::parse(input.trim()).ok()?;
        let host = url.host_str()?;
        let netloc = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };
        let raw_path = url.path().to_owned();
        let path = decode_url(&raw_path).trim_end_matches('/').to_owned();
        let params = url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();

        Some(Self {
            scheme: url.scheme().to_owned(),
            netloc,
            raw_path,
            path,
            raw_query: url.query().unwrap_or_default().to_owned(),
            params,
        })
    }

    /// Every query pair in order, blank values included.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Whether `key` is present with a non-blank value.
    #[must_use]
    pub fn has_param(&self, key: &str) -> bool {
        self.param(key).is_some()
    }

    /// First non-blank value of `key`.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, v)| k == key && !v.is_empty()).map(|(_, v)| v.as_str())
    }

    /// Distinct keys that carry a non-blank value, in first-seen order.
    #[must_use]
    pub fn param_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for (k, v) in &self.params {
            if !v.is_empty() && !keys.contains(&k.as_str()) {
                keys.push(k);
            }
        }
        keys
    }

    /// Non-empty segments of the decoded path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    /// Segments that are not `.php` scripts.
    #[must_use]
    pub fn content_segments(&self) -> Vec<&str> {
        self.segments().filter(|s| !s.ends_with(".php")).collect()
    }

    /// Whether the decoded path ends in `/<digits>`.
    #[must_use]
    pub fn ends_with_numeric_segment(&self) -> bool {
        self.path.rsplit_once('/').is_some_and(|(_, last)| is_all_digits(last))
    }

    /// `scheme://netloc` followed by the raw path.
    #[must_use]
    pub fn base(&self) -> String {
        format!("{}://{}{}", self.scheme, self.netloc, self.raw_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_domain_strips_scheme_and_slash() {
        assert_eq!(normalize_domain("https://mtgal.com/"), "mtgal.com");
        assert_eq!(normalize_domain("http://a.b.com//"), "a.b.com");
        assert_eq!(normalize_domain("  plain.org "), "plain.org");
    }

    #[test]
    fn normalize_domain_matches_parsed_hosts() {
        assert_eq!(normalize_domain("https://MTGAL.com/"), "mtgal.com");
        assert_eq!(normalize_domain("MTGAL.com"), netloc_of("https://mtgal.com/free"));
        assert_eq!(normalize_domain("A.com:8080/Board/"), "a.com:8080/Board");

        let idn = normalize_domain("먹튀갤.com");
        assert!(idn.starts_with("xn--"));
        assert_eq!(idn, netloc_of("https://먹튀갤.com/free"));
    }

    #[test]
    fn decode_url_restores_hangul() {
        assert_eq!(
            decode_url("https://a.com/%EC%9E%90%EC%9C%A0%EA%B2%8C%EC%8B%9C%ED%8C%90"),
            "https://a.com/자유게시판"
        );
        assert_eq!(decode_url("https://a.com/%ZZ"), "https://a.com/%ZZ");
    }

    #[test]
    fn parse_exposes_decoded_path_and_segments() {
        let parsed = ParsedUrl::parse("https://mt-to.com:8443/bsite/%EB%B0%94%EB%94%94-먹튀/").unwrap();
        assert_eq!(parsed.netloc, "mt-to.com:8443");
        assert_eq!(parsed.path, "/bsite/바디-먹튀");
        assert_eq!(parsed.segments().collect::<Vec<_>>(), ["bsite", "바디-먹튀"]);
        assert!(parsed.raw_path.ends_with('/'));
    }

    #[test]
    fn root_path_is_empty() {
        let parsed = ParsedUrl::parse("https://example.com").unwrap();
        assert_eq!(parsed.path, "");
        assert_eq!(parsed.raw_path, "/");
        assert_eq!(parsed.segments().count(), 0);
    }

    #[test]
    fn blank_params_are_ignored_by_lookups_only() {
        let parsed = ParsedUrl::parse("https://a.com/bbs/board.php?bo_table=free&page=&wr_id=3").unwrap();
        assert!(parsed.has_param("wr_id"));
        assert!(!parsed.has_param("page"));
        assert_eq!(parsed.param_keys(), ["bo_table", "wr_id"]);
        assert_eq!(parsed.params().len(), 3);
        assert_eq!(parsed.content_segments(), ["bbs"]);
    }

    #[test]
    fn relative_and_hostless_urls_are_rejected() {
        assert!(ParsedUrl::parse("/just/a/path").is_none());
        assert!(ParsedUrl::parse("mailto:someone@example.com").is_none());
        assert!(ParsedUrl::parse("").is_none());
    }

    #[test]
    fn numeric_tail_detection() {
        assert!(ParsedUrl::parse("https://a.com/mt/4446/").unwrap().ends_with_numeric_segment());
        assert!(!ParsedUrl::parse("https://a.com/mt/v4446").unwrap().ends_with_numeric_segment());
        assert!(!ParsedUrl::parse("https://a.com/").unwrap().ends_with_numeric_segment());
    }

    #[test]
    fn hangul_range() {
        assert!(is_hangul('가'));
        assert!(is_hangul('힣'));
        assert!(!is_hangul('a'));
        assert!(contains_hangul("abc먹튀"));
    }
}
