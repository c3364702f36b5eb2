//! Canonical link resolution.

use dom_query::Document;
use regex::Regex;
use url::Url;

use crate::dom;
use crate::metadata::meta_tags::get_meta_content;
use crate::result::ResolvedMetadata;

/// Resolve the canonical link into `original`.
#[must_use]
pub fn extract_canonical_link(doc: &Document, url: &str, original: ResolvedMetadata) -> ResolvedMetadata {
    ResolvedMetadata {
        canonical_link: get_canonical_link(doc, url),
        ..original
    }
}

/// `<link rel="canonical">` href, else `og:url`, made absolute.
///
/// Some sites publish host-less values such as `example.com/story.html`;
/// everything up to the article's own host is dropped and the remainder is
/// rebuilt on the article's scheme and host.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{dom, metadata::get_canonical_link};
///
/// let doc = dom::parse(r#"<meta property="og:url" content="example.com/article.html">"#);
/// assert_eq!(
///     get_canonical_link(&doc, "https://example.com/news/x"),
///     "https://example.com/article.html"
/// );
/// ```
#[must_use]
pub fn get_canonical_link(doc: &Document, article_url: &str) -> String {
    let root = doc.select("html");
    let canonical = dom::elements_by_attr(&root, Some("link"), "rel", "canonical")
        .first()
        .and_then(|link| dom::get_attribute(link, "href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty());

    let meta_url = match canonical {
        Some(href) => href,
        None => get_meta_content(doc, r#"meta[property="og:url"]"#),
    };
    if meta_url.is_empty() {
        return String::new();
    }

    if Url::parse(&meta_url).is_ok_and(|u| u.host_str().is_some()) {
        return meta_url;
    }

    let Ok(article) = Url::parse(article_url) else {
        return meta_url;
    };
    let Some(host) = article.host_str() else {
        return meta_url;
    };

    let path = relative_path(&meta_url);
    let true_path = Regex::new(&format!(r"^.*{}/(.*)$", regex::escape(host)))
        .ok()
        .and_then(|re| re.captures(&path).and_then(|c| c.get(1)).map(|m| m.as_str().to_string()))
        .unwrap_or(path);

    let separator = if true_path.starts_with('/') { "" } else { "/" };
    format!("{}://{host}{separator}{true_path}", article.scheme())
}

/// Path part of a host-less reference: query and fragment removed.
fn relative_path(reference: &str) -> String {
    let end = reference.find(['?', '#']).unwrap_or(reference.len());
    reference[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_rel_canonical_preferred() {
        let doc = dom::parse(
            r#"<head><link rel="canonical" href="https://example.com/a">
               <meta property="og:url" content="https://example.com/b"></head>"#,
        );
        assert_eq!(get_canonical_link(&doc, "https://example.com/x"), "https://example.com/a");
    }

    #[test]
    fn test_og_url_fallback() {
        let doc = dom::parse(r#"<meta property="og:url" content=" https://example.com/b ">"#);
        assert_eq!(get_canonical_link(&doc, "https://example.com/x"), "https://example.com/b");
    }

    #[test]
    fn test_hostless_path_with_host_prefix() {
        let doc = dom::parse(r#"<link rel="canonical" href="example.com/article.html">"#);
        assert_eq!(
            get_canonical_link(&doc, "https://example.com/news/x"),
            "https://example.com/article.html"
        );
    }

    #[test]
    fn test_relative_path_rebuilt_on_article_host() {
        let doc = dom::parse(r#"<link rel="canonical" href="/story/1?utm=x">"#);
        assert_eq!(
            get_canonical_link(&doc, "http://news.example.org/other"),
            "http://news.example.org/story/1"
        );
    }

    #[test]
    fn test_missing_canonical_is_empty() {
        let doc = dom::parse("<head></head>");
        assert_eq!(get_canonical_link(&doc, "https://example.com/x"), "");
    }
}
