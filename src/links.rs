//! Link canonicalization, duplicate detection and sorting
use std::collections::HashSet;

use url::Url;

use crate::tab_data::{Link, Linked};

/// Hostname of a URL, or `None` for anything that does not parse
/// (internal browser pages, plain text, ...)
pub fn get_hostname(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

/// The URL without its query string and fragment
///
/// Examples:
/// - https://www.google.com/search?q=rust → https://www.google.com/search
/// - https://docs.rs/regex#syntax → https://docs.rs/regex
/// - http://a.com → http://a.com/
pub fn get_plain_url(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    Some(parsed.into())
}

/// Comparison key for a link: plain url (or raw url) and lowercased title
/// joined by `^`
pub fn get_link_key<L: Linked + ?Sized>(link: &L) -> String {
    let url = link
        .url()
        .map(|url| get_plain_url(url).unwrap_or_else(|| url.to_string()))
        .unwrap_or_default();
    let title = link.title().map(str::to_lowercase).unwrap_or_default();
    format!("{}^{}", url, title)
}

/// Every link whose key was already seen earlier in `links` (keep first occurrence)
pub fn get_duplicates<L: Linked + Clone>(links: &[L]) -> Vec<L> {
    let mut seen = HashSet::new();
    links
        .iter()
        .filter(|link| !seen.insert(get_link_key(*link)))
        .cloned()
        .collect()
}

/// Sort links by url, then by title
pub fn sort_by_url_and_title<L: Linked>(links: &mut [L]) {
    links.sort_by(|a, b| {
        a.url()
            .unwrap_or_default()
            .cmp(b.url().unwrap_or_default())
            .then_with(|| a.title().unwrap_or_default().cmp(b.title().unwrap_or_default()))
    });
}

/// One link per non-blank line of pasted text, titled with its own url
pub fn links_from_text(text: &str) -> Vec<Link> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Link {
            url: line.to_string(),
            title: line.to_string(),
        })
        .collect()
}
