//! Category and feed URL discovery.
//!
//! A news source's front page links to its sections (`/world`,
//! `sports.example.com`). [`category_urls`] picks those out of every anchor
//! on the page; [`feed_urls`] collects RSS links from the category pages.

use std::collections::HashSet;

use dom_query::{Document, Selection};
use url::Url;

use crate::dom;
use crate::patterns::{RAW_URL, TAG_REMNANT};
use crate::url_utils::{prepare_url, split_domain};

/// Substrings that disqualify a category candidate's path or subdomain.
pub const URL_STOPWORDS: &[&str] = &[
    "about", "help", "privacy", "legal", "feedback", "sitemap", "profile", "account", "mobile",
    "facebook", "myspace", "twitter", "linkedin", "bebo", "friendster", "stumbleupon", "youtube",
    "vimeo", "store", "mail", "preferences", "maps", "password", "imgur", "flickr", "search",
    "subscription", "itunes", "siteindex", "events", "stop", "jobs", "careers", "newsletter",
    "subscribe", "academy", "shopping", "purchase", "site-map", "shop", "donate", "product",
    "advert", "info", "tickets", "coupons", "forum", "board", "archive", "browse", "howto",
    "how to", "faq", "terms", "charts", "services", "contact", "plus", "admin", "login",
    "signup", "register", "developer", "proxy",
];

/// Subdomains of mobile mirrors.
const MOBILE_SUBDOMAINS: &[&str] = &["m", "i"];

/// Path segments longer than this are not section roots.
const MAX_CATEGORY_SEGMENT_LEN: usize = 14;

/// Feed links kept per source.
const MAX_FEEDS: usize = 50;

/// Every anchor `href`, in document order.
#[must_use]
pub fn get_urls(doc: &Document) -> Vec<String> {
    anchors(doc).into_iter().map(|(href, _)| href).collect()
}

/// Every anchor `href` paired with the anchor text.
#[must_use]
pub fn get_urls_with_titles(doc: &Document) -> Vec<(String, String)> {
    anchors(doc)
}

fn anchors(doc: &Document) -> Vec<(String, String)> {
    doc.select("a[href]")
        .nodes()
        .iter()
        .filter_map(|node| {
            let anchor = Selection::from(*node);
            let href = dom::get_attribute(&anchor, "href").filter(|h| !h.is_empty())?;
            Some((href, anchor.text().to_string()))
        })
        .collect()
}

/// Absolute http(s) URLs found in raw markup without parsing it.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::categories::urls_from_html;
///
/// let html = r#"<p>Read <a href="https://example.com/a">this</a> or http://b.org/x</p>"#;
/// // URLs inside tag attributes are removed with the tags
/// assert_eq!(urls_from_html(html), vec!["http://b.org/x"]);
/// ```
#[must_use]
pub fn urls_from_html(html: &str) -> Vec<String> {
    let text = TAG_REMNANT.replace_all(html, " ");
    RAW_URL
        .find_iter(&text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Scheme, host (with port) and path of an absolute, scheme-relative or
/// relative reference. The fragment stays part of the path.
#[derive(Debug, Default)]
struct LinkParts {
    scheme: String,
    domain: String,
    path: String,
}

fn link_parts(href: &str) -> LinkParts {
    let href = href.trim();

    let from_url = |url: &Url, scheme: &str| {
        let domain = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };
        let mut path = url.path().to_string();
        if let Some(fragment) = url.fragment() {
            path.push('#');
            path.push_str(fragment);
        }
        LinkParts {
            scheme: scheme.to_string(),
            domain,
            path,
        }
    };

    if let Ok(url) = Url::parse(href) {
        return from_url(&url, url.scheme());
    }
    if let Some(rest) = href.strip_prefix("//") {
        if let Ok(url) = Url::parse(&format!("http://{rest}")) {
            return from_url(&url, "");
        }
    }

    let end = href.find('?').unwrap_or(href.len());
    LinkParts {
        path: href[..end].to_string(),
        ..LinkParts::default()
    }
}

/// Section URLs linked from a source's front page.
///
/// Keeps links on the source's registrable domain (or on a subdomain
/// mentioning it, as `espn.go.com` does for `espn.com`) and single-segment
/// relative paths. Mobile mirrors and [`URL_STOPWORDS`] matches are
/// dropped. The source root is always included. Results are absolute,
/// unique, in first-seen order.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{categories::category_urls, dom};
///
/// let doc = dom::parse(r#"<a href="http://m.espn.com/nba">m</a>
///     <a href="http://espn.go.com/nfl">nfl</a>
///     <a href="http://unrelated.com/x">x</a>"#);
/// let urls = category_urls("http://espn.com", &doc);
/// assert_eq!(urls, vec!["http://espn.go.com/", "http://espn.com/"]);
/// ```
#[must_use]
pub fn category_urls(source_url: &str, doc: &Document) -> Vec<String> {
    let source_domain = link_parts(source_url).domain;
    let source_tld = split_domain(&source_domain);

    let mut candidates = Vec::new();
    for href in get_urls(doc) {
        let parts = link_parts(&href);

        if parts.domain.is_empty() && parts.path.is_empty() {
            tracing::debug!(url = %href, "category rejected: no domain or path");
            continue;
        }
        if parts.path.starts_with('#') {
            tracing::debug!(url = %href, "category rejected: fragment");
            continue;
        }
        if !parts.scheme.is_empty() && parts.scheme != "http" && parts.scheme != "https" {
            tracing::debug!(url = %href, "category rejected: scheme");
            continue;
        }

        if parts.domain.is_empty() {
            let mut chunks: Vec<&str> = parts.path.split('/').filter(|c| !c.is_empty()).collect();
            if let Some(pos) = chunks.iter().position(|c| *c == "index.html") {
                chunks.remove(pos);
            }
            match chunks.as_slice() {
                [only] if only.chars().count() < MAX_CATEGORY_SEGMENT_LEN => {
                    candidates.push(parts.path.clone());
                }
                _ => tracing::debug!(url = %href, "category rejected: path shape"),
            }
            continue;
        }

        let child = split_domain(&parts.domain);
        let related_subdomain = child.subdomain.split('.').any(|p| p == source_tld.domain);
        if !related_subdomain && child.domain != source_tld.domain {
            tracing::debug!(url = %href, "category rejected: domain mismatch");
        } else if MOBILE_SUBDOMAINS.contains(&child.subdomain.as_str()) {
            tracing::debug!(url = %href, "category rejected: mobile subdomain");
        } else {
            candidates.push(format!("{}://{}", parts.scheme, parts.domain));
        }
    }

    let mut kept: Vec<String> = candidates
        .into_iter()
        .filter(|candidate| {
            let parts = link_parts(candidate);
            let subdomain = split_domain(&parts.domain).subdomain;
            let conjunction = format!("{} {subdomain}", parts.path).to_lowercase();
            let bad = URL_STOPWORDS.iter().any(|w| conjunction.contains(w));
            if bad {
                tracing::debug!(url = %candidate, "category rejected: stopword");
            }
            !bad
        })
        .collect();
    kept.push("/".to_string());

    let mut seen = HashSet::new();
    kept.into_iter()
        .map(|candidate| normalize_candidate(&candidate))
        .filter(|candidate| seen.insert(candidate.clone()))
        .map(|candidate| prepare_url(&candidate, Some(source_url)))
        .filter(|url| !url.is_empty())
        .collect()
}

/// Repair scheme-less forms and drop one trailing slash.
fn normalize_candidate(candidate: &str) -> String {
    let mut fixed = if candidate.starts_with("://") {
        format!("http{candidate}")
    } else if candidate.starts_with("//") {
        format!("http:{candidate}")
    } else {
        candidate.to_string()
    };
    if fixed.ends_with('/') {
        fixed.pop();
    }
    fixed
}

/// RSS feed links declared by category pages.
///
/// At most 50 links are considered; results are absolute and unique, in
/// first-seen order.
#[must_use]
pub fn feed_urls(source_url: &str, category_docs: &[Document]) -> Vec<String> {
    let mut seen = HashSet::new();
    category_docs
        .iter()
        .flat_map(|doc| {
            let root = doc.select("html");
            dom::elements_by_attr(&root, None, "type", "application/rss+xml")
                .iter()
                .filter_map(|link| dom::non_empty_attribute(link, "href"))
                .collect::<Vec<_>>()
        })
        .take(MAX_FEEDS)
        .map(|href| prepare_url(&href, Some(source_url)))
        .filter(|url| !url.is_empty() && seen.insert(url.clone()))
        .collect()
}
