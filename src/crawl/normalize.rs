// src/crawl/normalize.rs
// =============================================================================
// URL helpers shared by the extractor and the frontier.
//
// - normalize(): the canonical form used as a graph key / dedup key
// - has_excluded_suffix(): links to images and documents we never crawl
// =============================================================================

use url::Url;

/// Suffixes of links that are never followed.
///
/// Matched case-sensitively against the whole URL string.
pub const EXCLUDED_SUFFIXES: [&str; 5] = [".png", ".jpg", ".jpeg", ".htm", ".pdf"];

// Returns a copy of the URL with query string and fragment removed
//
// Examples:
//   https://example.com/a?page=2   -> https://example.com/a
//   https://example.com/a#section  -> https://example.com/a
pub fn normalize(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_query(None);
    normalized.set_fragment(None);
    normalized
}

pub fn has_excluded_suffix(url: &Url) -> bool {
    let s = url.as_str();
    EXCLUDED_SUFFIXES.iter().any(|suffix| s.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_strips_query_and_fragment() {
        assert_eq!(
            normalize(&url("https://example.com/a?x=1#top")).as_str(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&url("https://example.com/a/b?q=1#f"));
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_query_variants_share_a_key() {
        assert_eq!(
            normalize(&url("http://a.test/x")),
            normalize(&url("http://a.test/x?y=1"))
        );
        assert_eq!(
            normalize(&url("http://a.test/x#frag")),
            normalize(&url("http://a.test/x?y=1#other"))
        );
    }

    #[test]
    fn test_path_differences_are_kept() {
        assert_ne!(
            normalize(&url("http://a.test/x")),
            normalize(&url("http://a.test/x/"))
        );
    }

    #[test]
    fn test_excluded_suffixes() {
        assert!(has_excluded_suffix(&url("https://example.com/logo.png")));
        assert!(has_excluded_suffix(&url("https://example.com/photo.jpg")));
        assert!(has_excluded_suffix(&url("https://example.com/photo.jpeg")));
        assert!(has_excluded_suffix(&url("https://example.com/old.htm")));
        assert!(has_excluded_suffix(&url("https://example.com/paper.pdf")));
    }

    #[test]
    fn test_suffix_match_is_case_sensitive_and_whole_url() {
        assert!(!has_excluded_suffix(&url("https://example.com/LOGO.PNG")));
        assert!(!has_excluded_suffix(&url("https://example.com/index.html")));
        // A query after the extension hides the suffix
        assert!(!has_excluded_suffix(&url("https://example.com/paper.pdf?dl=1")));
        assert!(has_excluded_suffix(&url("https://example.com/view?file=paper.pdf")));
    }
}
